/// 几何体加载和处理模块
///
/// 提供模型加载、网格数据结构以及条带化结果到顶点缓冲的展开。
///
/// # 模块结构
///
/// - `vertex`: 交错顶点数据结构定义
/// - `mesh`: 多重索引的面和网格数据
/// - `loaders`: 各种格式的模型加载器
/// - `buffers`: 三角形列表/条带顶点缓冲构建
///
/// # 架构设计
///
/// ```text
/// 文件 (OBJ)
///     ↓
/// Loader (ObjLoader)
///     ↓
/// MeshData (CPU侧数据)
///     ↓
/// StripData (条带化)
///     ↓
/// MeshBuffers (交给渲染器上传)
/// ```
///
/// # 使用示例
///
/// ```rust,no_run
/// use mesh_strip::geometry::loaders::{MeshLoader, ObjLoader};
/// use std::path::Path;
///
/// // 加载OBJ模型
/// let mesh_data = ObjLoader::load_from_file(Path::new("model.obj"))?;
///
/// println!("顶点数: {}", mesh_data.vertex_count());
/// println!("三角形数: {}", mesh_data.triangle_count());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```

pub mod vertex;
pub mod mesh;
pub mod loaders;
pub mod buffers;

// 重新导出常用类型
pub use vertex::Vertex;
pub use mesh::{Face, MeshData, VertexIndex};
pub use buffers::{GeometryBuffer, MeshBuffers, PrimitiveTopology};
