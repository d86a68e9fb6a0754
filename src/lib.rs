//! mesh_strip - 三角形网格条带化库
//!
//! 把三角形网格的面列表划分为三角形条带（triangle strip）和无法合并的浮动三角形，
//! 减少渲染时需要提交的顶点数。
//!
//! # 模块结构
//!
//! - `core`: 核心功能模块（日志、配置、错误处理）
//! - `geometry`: 几何体模块（顶点、网格、OBJ 加载器、顶点缓冲）
//! - `stripper`: 条带化算法
//!
//! # 使用示例
//!
//! ```no_run
//! use mesh_strip::geometry::loaders::{MeshLoader, ObjLoader};
//! use mesh_strip::stripper::StripData;
//! use std::path::Path;
//!
//! let mesh = ObjLoader::load_from_file(Path::new("assets/cube.obj"))?;
//! let strips = StripData::from_mesh(&mesh)?;
//!
//! for strip in &strips.triangle_strips {
//!     println!("条带: {:?}", strip.position_indices());
//! }
//! println!("浮动三角形: {}", strips.floating_triangles.len());
//! # Ok::<(), mesh_strip::core::MeshStripError>(())
//! ```

pub mod core;
pub mod geometry;
pub mod stripper;
