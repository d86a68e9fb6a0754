/// OBJ 模型条带化示例
///
/// 加载 OBJ 文件，打印条带划分结果和顶点缓冲信息。
///
/// 运行方式：
/// ```
/// cargo run --example stripify_obj -- assets/cube.obj
/// ```

use mesh_strip::geometry::loaders::{MeshLoader, ObjLoader};
use mesh_strip::geometry::{MeshBuffers, PrimitiveTopology};
use mesh_strip::stripper::StripData;
use std::path::Path;

fn main() {
    // 初始化日志系统
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "assets/cube.obj".to_string());
    let obj_path = Path::new(&path);

    println!("=== mesh_strip 条带化示例 ===\n");
    println!("正在加载: {}", obj_path.display());

    let mesh = match ObjLoader::load_from_file(obj_path) {
        Ok(mesh) => mesh,
        Err(e) => {
            eprintln!("\n✗ 加载失败: {}", e);
            std::process::exit(1);
        }
    };

    println!("\n网格信息:");
    println!("  名称: {}", mesh.name.as_deref().unwrap_or("未命名"));
    println!("  顶点数: {}", mesh.vertex_count());
    println!("  三角形数: {}", mesh.triangle_count());

    let strips = match StripData::from_mesh(&mesh) {
        Ok(strips) => strips,
        Err(e) => {
            eprintln!("\n✗ 条带化失败: {}", e);
            std::process::exit(1);
        }
    };

    println!("\n条带（共 {} 条）:", strips.triangle_strips.len());
    for (i, strip) in strips.triangle_strips.iter().enumerate() {
        let reversed = if strip.winding_reversed() { " (反向绕序)" } else { "" };
        println!("  条带 {}: {:?}{}", i, strip.position_indices(), reversed);
    }

    println!("\n浮动三角形（共 {} 个）:", strips.floating_triangles.len());
    for face in &strips.floating_triangles {
        println!("  {:?}", face.positions());
    }

    let stats = strips.stats();
    println!(
        "\n提交顶点数: {} → {}",
        stats.list_vertices(),
        stats.emitted_vertices()
    );

    match MeshBuffers::build(&mesh, &strips) {
        Ok(buffers) => {
            println!("\n顶点缓冲:");
            for (i, buffer) in buffers.buffers().iter().enumerate() {
                let topology = match buffer.topology {
                    PrimitiveTopology::TriangleList => "TriangleList",
                    PrimitiveTopology::TriangleStrip => "TriangleStrip",
                };
                println!(
                    "  缓冲 {}: {} 个顶点, {} 字节, {}",
                    i,
                    buffer.vertex_count(),
                    buffer.as_bytes().len(),
                    topology
                );
            }
        }
        Err(e) => eprintln!("\n✗ 顶点缓冲构建失败: {}", e),
    }

    println!("\n=== 示例完成 ===");
}
