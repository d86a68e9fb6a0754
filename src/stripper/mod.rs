//! 网格条带化模块
//!
//! 把网格的面列表划分为三角形条带和无法合并的"浮动"三角形。
//!
//! # 算法
//!
//! ```text
//! 面池（输入顺序）
//!     ↓  取出第一个面 F1，找第一个共边面 F2   ── 找不到 → 浮动三角形
//!     ↓  [unique(F1), a, b, unique(F2)]
//!     ↓  找能接到种子外端的 F3                ── 找不到 → 两三角形条带
//!     ↓  五顶点条带
//!     ↓  反复扩展头尾两端，直到整池扫描无匹配
//! StripData
//! ```
//!
//! 这是贪心、不回溯的启发式：面一旦被条带消耗就不再参与，
//! 结果不保证条带数量最少。
//!
//! # 复杂度
//!
//! 每次成功匹配做一次池扫描，每条带结束时再做一次失败扫描，
//! 最坏情况（完全不连通的网格）约为 O(n²)。扫描顺序是可复现性的一部分，
//! 不能为了性能改成哈希或并行查找。

pub mod adjacency;
pub mod strip;

use serde::Serialize;

use crate::core::error::Result;
use crate::geometry::mesh::{Face, MeshData};
use adjacency::{find_adjacent_face, find_end_extension, find_seed_attachment};
use strip::StripBuilder;

pub use adjacency::End;
pub use strip::{TriangleStrip, MIN_STRIP_LEN};

/// 条带化结果
///
/// 每个输入面恰好出现一次：要么在 `floating_triangles` 中，
/// 要么是某个条带的隐含三角形。两个集合都保持发现顺序。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StripData {
    /// 无法合并进条带的三角形
    pub floating_triangles: Vec<Face>,

    /// 三角形条带（每条至少 4 个顶点）
    pub triangle_strips: Vec<TriangleStrip>,
}

/// 条带化统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StripStats {
    pub face_count: usize,
    pub floating_triangles: usize,
    pub strip_count: usize,
    pub strip_vertices: usize,
    pub longest_strip: usize,
    pub reversed_strips: usize,
}

impl StripStats {
    /// 渲染器需要提交的顶点总数
    pub fn emitted_vertices(&self) -> usize {
        self.floating_triangles * 3 + self.strip_vertices
    }

    /// 全部按三角形列表提交时的顶点数
    pub fn list_vertices(&self) -> usize {
        self.face_count * 3
    }
}

/// 一次抽取的结果
enum Extracted {
    Floating(Face),
    Strip(TriangleStrip),
}

impl StripData {
    /// 校验网格后进行条带化
    ///
    /// 任何越界索引都会在修改输出之前以 `MalformedMesh` 返回。
    pub fn from_mesh(mesh: &MeshData) -> Result<Self> {
        mesh.validate()?;
        Ok(Self::from_faces(&mesh.faces))
    }

    /// 对面列表进行条带化
    ///
    /// 纯函数：同样顺序的输入总是得到完全相同的输出。
    pub fn from_faces(faces: &[Face]) -> Self {
        let span = crate::span_trace!("stripify", faces = faces.len());
        let _enter = span.enter();

        if faces.is_empty() {
            crate::strip_warn!("Mesh has no faces, producing empty strip data");
            return Self::default();
        }

        let mut pool = faces.to_vec();
        let mut data = Self::default();
        while !pool.is_empty() {
            match extract_next(&mut pool) {
                Extracted::Floating(face) => data.floating_triangles.push(face),
                Extracted::Strip(strip) => data.triangle_strips.push(strip),
            }
        }

        let stats = data.stats();
        crate::strip_info!(
            faces = stats.face_count,
            strips = stats.strip_count,
            floating = stats.floating_triangles,
            longest = stats.longest_strip,
            vertices = stats.emitted_vertices(),
            "Stripification finished"
        );
        data
    }

    /// 两个集合都为空
    pub fn is_empty(&self) -> bool {
        self.floating_triangles.is_empty() && self.triangle_strips.is_empty()
    }

    /// 按结果顺序列出所有面：先浮动三角形，再逐条带
    pub fn faces(&self) -> impl Iterator<Item = &Face> + '_ {
        self.floating_triangles
            .iter()
            .chain(self.triangle_strips.iter().flat_map(|s| s.faces().iter()))
    }

    pub fn stats(&self) -> StripStats {
        let strip_faces: usize = self.triangle_strips.iter().map(|s| s.triangle_count()).sum();
        StripStats {
            face_count: self.floating_triangles.len() + strip_faces,
            floating_triangles: self.floating_triangles.len(),
            strip_count: self.triangle_strips.len(),
            strip_vertices: self.triangle_strips.iter().map(|s| s.len()).sum(),
            longest_strip: self.triangle_strips.iter().map(|s| s.len()).max().unwrap_or(0),
            reversed_strips: self.triangle_strips.iter().filter(|s| s.winding_reversed()).count(),
        }
    }
}

/// 从池头开始抽取一个浮动三角形或一条条带
fn extract_next(pool: &mut Vec<Face>) -> Extracted {
    let first = pool.remove(0);

    let Some(edge) = find_adjacent_face(&first, pool) else {
        return Extracted::Floating(first);
    };
    let second = pool.remove(edge.pool_index);
    let mut builder = StripBuilder::seed(first, second, &edge);

    let attachment = builder
        .seed_vertices()
        .and_then(|seed| find_seed_attachment(&seed, pool));
    if let Some(attachment) = attachment {
        let third = pool.remove(attachment.pool_index);
        builder.attach_seed(third, &attachment);
        expand(&mut builder, pool);
    }

    crate::strip_debug!(len = builder.len(), remaining = pool.len(), "Strip finished");
    Extracted::Strip(builder.finish())
}

/// 贪心地双向扩展条带，直到整池扫描都找不到可接的面
fn expand(builder: &mut StripBuilder, pool: &mut Vec<Face>) {
    while let Some(attachment) = find_end_extension(builder.leading_end(), builder.trailing_end(), pool) {
        let face = pool.remove(attachment.pool_index);
        builder.extend(attachment.end, attachment.new_vertex, face);
    }
}
