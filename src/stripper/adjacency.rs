//! 邻接匹配原语
//!
//! 所有连通性判断都归结为同一个谓词 [`shares_edge`]：
//! 候选面恰好有两个角分别落在边的两个端点上，第三个角是新顶点。
//! 拓扑只看位置索引，UV 和法线索引不参与。
//!
//! 每个查找函数都按池中顺序扫描并返回第一个匹配，保证结果可复现。

use crate::geometry::mesh::{Face, VertexIndex};

/// 条带的哪一端
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum End {
    /// 条带头部（索引 0 一侧），新顶点插在最前
    Leading,
    /// 条带尾部，新顶点追加在最后
    Trailing,
}

/// 面与面之间的共边匹配（种子第一步）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeMatch {
    /// 匹配面在池中的位置
    pub pool_index: usize,
    /// 第一个面上不在共享边上的角
    pub unique_first: VertexIndex,
    /// 共享边的两个角，按第一个面的绕序从 `unique_first` 之后排列
    pub shared: [VertexIndex; 2],
    /// 匹配面上不在共享边上的角
    pub new_vertex: VertexIndex,
}

/// 面与条带端点之间的匹配
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripAttachment {
    /// 匹配面在池中的位置
    pub pool_index: usize,
    /// 连接到条带的哪一端
    pub end: End,
    /// 连接前是否需要交换种子的两个内侧顶点
    pub swap_inner: bool,
    /// 匹配面带来的新顶点
    pub new_vertex: VertexIndex,
}

/// 条带一端的窗口
///
/// `edge` 是端点处的两个位置（头部为 v\[0\], v\[1\]，尾部为 v\[n-1\], v\[n-2\]），
/// `apex` 是紧挨着的第三个位置。新顶点等于 `apex` 的面与端部三角形重复，不接受。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripEnd {
    pub edge: [u32; 2],
    pub apex: u32,
}

/// 共边谓词
///
/// `face` 恰好有两个角分别等于 `edge` 的两个端点，且第三个角不在边上时，
/// 返回第三个角。退化面（位置重复）永远不匹配。
pub fn shares_edge(edge: [u32; 2], face: &Face) -> Option<VertexIndex> {
    if edge[0] == edge[1] || face.is_degenerate() {
        return None;
    }

    let mut hit = [false; 2];
    let mut third = None;
    for vertex in &face.vertices {
        let p = vertex.position_idx;
        if p == edge[0] {
            hit[0] = true;
        } else if p == edge[1] {
            hit[1] = true;
        } else if third.replace(*vertex).is_some() {
            return None;
        }
    }

    match (hit, third) {
        ([true, true], Some(vertex)) => Some(vertex),
        _ => None,
    }
}

/// 在池中查找第一个与 `first` 恰好共享两个位置的面
pub fn find_adjacent_face(first: &Face, pool: &[Face]) -> Option<EdgeMatch> {
    if first.is_degenerate() {
        return None;
    }

    let v = &first.vertices;
    pool.iter().enumerate().find_map(|(pool_index, candidate)| {
        // k 是第一个面上假定的独有角，对边为 (k+1, k+2)
        (0..3).find_map(|k| {
            let a = v[(k + 1) % 3];
            let b = v[(k + 2) % 3];
            let new_vertex = shares_edge([a.position_idx, b.position_idx], candidate)?;
            if first.contains_position(new_vertex.position_idx) {
                // 三个位置全部相同：重复面
                return None;
            }
            Some(EdgeMatch {
                pool_index,
                unique_first: v[k],
                shared: [a, b],
                new_vertex,
            })
        })
    })
}

/// 在池中查找能接到四顶点种子上的第三个面
///
/// 种子 `[u, p, q, w]` 中 u、w 为外侧端点，p、q 为内侧顶点。
/// 候选面必须恰好命中一个外侧端点、一个内侧顶点，并带来一个新顶点。
/// 若命中的内侧顶点与外侧端点在条带中不相邻（u 配 q，或 w 配 p），
/// 需要先交换内侧顶点。
pub fn find_seed_attachment(seed: &[VertexIndex; 4], pool: &[Face]) -> Option<StripAttachment> {
    let [u, p, q, w] = [
        seed[0].position_idx,
        seed[1].position_idx,
        seed[2].position_idx,
        seed[3].position_idx,
    ];

    pool.iter().enumerate().find_map(|(pool_index, candidate)| {
        if candidate.is_degenerate() {
            return None;
        }

        // 每类最多命中一次，第二次命中立即淘汰该候选面
        let mut outer = None;
        let mut inner = None;
        let mut fresh = None;
        for vertex in &candidate.vertices {
            let repeated = match vertex.position_idx {
                x if x == u => outer.replace(End::Leading).is_some(),
                x if x == w => outer.replace(End::Trailing).is_some(),
                x if x == p => inner.replace(1).is_some(),
                x if x == q => inner.replace(2).is_some(),
                _ => fresh.replace(*vertex).is_some(),
            };
            if repeated {
                return None;
            }
        }

        let (end, inner, new_vertex) = (outer?, inner?, fresh?);
        let adjacent_inner = match end {
            End::Leading => 1,
            End::Trailing => 2,
        };
        Some(StripAttachment {
            pool_index,
            end,
            swap_inner: inner != adjacent_inner,
            new_vertex,
        })
    })
}

/// 在池中查找能扩展条带任一端的第一个面
///
/// 对每个候选面先试头部再试尾部。
pub fn find_end_extension(leading: StripEnd, trailing: StripEnd, pool: &[Face]) -> Option<StripAttachment> {
    let extends = |end: StripEnd, face: &Face| {
        shares_edge(end.edge, face).filter(|v| v.position_idx != end.apex)
    };

    pool.iter().enumerate().find_map(|(pool_index, candidate)| {
        if let Some(new_vertex) = extends(leading, candidate) {
            return Some(StripAttachment {
                pool_index,
                end: End::Leading,
                swap_inner: false,
                new_vertex,
            });
        }
        extends(trailing, candidate).map(|new_vertex| StripAttachment {
            pool_index,
            end: End::Trailing,
            swap_inner: false,
            new_vertex,
        })
    })
}
