//! mesh_strip - 网格条带化工具
//!
//! 读取 OBJ 模型，把三角形划分为三角形条带和浮动三角形，
//! 输出统计信息，并可把划分结果写成 TOML 文件。
//!
//! # 使用方法
//!
//! ```bash
//! # 使用配置文件
//! cargo run
//!
//! # 命令行覆盖
//! cargo run -- --input assets/cube.obj --output cube_strips.toml --log-level debug
//! ```
//!
//! # 处理流程
//!
//! ```text
//! ┌─────────────┐
//! │   main.rs   │  配置 / 日志
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  ObjLoader  │  MeshData
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  StripData  │  条带 + 浮动三角形
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ MeshBuffers │  顶点缓冲统计 / TOML 输出
//! └─────────────┘
//! ```

use anyhow::Context;
use mesh_strip::core::{log, Config};
use mesh_strip::geometry::loaders::load_mesh;
use mesh_strip::geometry::MeshBuffers;
use mesh_strip::stripper::StripData;
use std::path::Path;
use tracing::{error, info};

/// 应用程序入口点
///
/// # 初始化流程
///
/// 1. 加载配置文件（config.toml）
/// 2. 应用命令行参数覆盖
/// 3. 初始化日志系统
/// 4. 加载模型并条带化
///
/// # 命令行参数
///
/// - `--input <path>`: 输入模型文件（也可作为第一个位置参数）
/// - `--output <path>`: 写出条带划分结果
/// - `--log-level <level>`: trace / debug / info / warn / error
fn main() {
    // 1. 加载配置（在初始化日志之前）
    let mut config = Config::from_file_or_default("config.toml");

    // 2. 应用命令行参数
    config.apply_args(std::env::args());

    // 3. 验证配置
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    // 4. 初始化日志系统
    let log_file = if config.logging.file_output {
        Some(config.logging.log_file.as_str())
    } else {
        None
    };
    if let Err(e) = log::init_logger(config.logging.level, config.logging.file_output, log_file) {
        eprintln!("Failed to initialize logger: {}", e);
        std::process::exit(1);
    }
    info!(version = env!("CARGO_PKG_VERSION"), "mesh_strip starting...");

    if let Err(e) = run(&config) {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(config: &Config) -> anyhow::Result<()> {
    let input = Path::new(&config.input.path);
    let mesh = load_mesh(input).with_context(|| format!("Failed to load mesh {}", input.display()))?;

    let strips = StripData::from_mesh(&mesh).context("Stripification failed")?;

    let stats = strips.stats();
    info!(
        faces = stats.face_count,
        strips = stats.strip_count,
        floating = stats.floating_triangles,
        longest_strip = stats.longest_strip,
        reversed_strips = stats.reversed_strips,
        "Strip partition"
    );
    info!(
        list_vertices = stats.list_vertices(),
        strip_vertices = stats.emitted_vertices(),
        "Vertex submission"
    );

    let buffers = MeshBuffers::build(&mesh, &strips).context("Failed to build geometry buffers")?;
    info!(
        buffers = buffers.len(),
        vertices = buffers.total_vertices(),
        "Geometry buffers ready"
    );

    if let Some(output) = &config.stripper.output {
        let contents = toml::to_string_pretty(&strips).context("Failed to serialize strip data")?;
        std::fs::write(output, contents).with_context(|| format!("Failed to write {}", output))?;
        info!(path = %output, "Strip data written");
    }

    Ok(())
}
