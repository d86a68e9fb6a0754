//! 三角形条带
//!
//! 条带 `v[0..n]` 隐含 n-2 个三角形，第 i 个为 `(v[i], v[i+1], v[i+2])`。
//! 按条带绘制规则，奇数三角形的前两个顶点交换后才是它的实际绕序，
//! 因此相邻三角形沿共享边的走向正好相反。

use std::collections::VecDeque;

use serde::Serialize;

use super::adjacency::{EdgeMatch, End, StripAttachment, StripEnd};
use crate::geometry::mesh::{Face, VertexIndex};

/// 条带的最少顶点数（两个三角形）
pub const MIN_STRIP_LEN: usize = 4;

/// 构建完成的三角形条带
///
/// 构建完成后不可变。`faces()[i]` 是第 i 个隐含三角形对应的输入面。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriangleStrip {
    vertices: Vec<VertexIndex>,
    faces: Vec<Face>,
    winding_reversed: bool,
}

impl TriangleStrip {
    /// 条带顶点序列
    #[inline]
    pub fn vertices(&self) -> &[VertexIndex] {
        &self.vertices
    }

    /// 与隐含三角形一一对应的输入面
    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// 顶点数
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// 隐含三角形数
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.vertices.len().saturating_sub(2)
    }

    /// 条带的位置索引序列
    pub fn position_indices(&self) -> Vec<u32> {
        self.vertices.iter().map(|v| v.position_idx).collect()
    }

    /// 按原始顺序列出隐含三角形 `(v[i], v[i+1], v[i+2])`
    pub fn triangles(&self) -> impl Iterator<Item = [VertexIndex; 3]> + '_ {
        self.vertices.windows(3).map(|w| [w[0], w[1], w[2]])
    }

    /// 第 i 个三角形的实际绕序（奇数三角形交换前两个顶点）
    pub fn oriented_triangle(&self, i: usize) -> Option<[VertexIndex; 3]> {
        let w = self.vertices.get(i..i + 3)?;
        Some(if i % 2 == 0 {
            [w[0], w[1], w[2]]
        } else {
            [w[1], w[0], w[2]]
        })
    }

    /// 整个条带的绕序与输入面相反
    ///
    /// 只有偶数长度的条带可能出现这种情况（奇数长度会在构建时翻转顺序修正），
    /// 渲染器绘制这类条带时需要切换正面朝向。
    #[inline]
    pub fn winding_reversed(&self) -> bool {
        self.winding_reversed
    }
}

/// 条带构建器
///
/// 只在条带化过程中存在；两端插入都是 O(1)。
#[derive(Debug)]
pub(crate) struct StripBuilder {
    vertices: VecDeque<VertexIndex>,
    faces: VecDeque<Face>,
}

impl StripBuilder {
    /// 由两个共边面构建四顶点种子 `[unique(F1), a, b, unique(F2)]`
    ///
    /// `a`、`b` 沿 F1 的绕序排列，三角形 0 保持 F1 的绕序。
    pub fn seed(first: Face, second: Face, edge: &EdgeMatch) -> Self {
        Self {
            vertices: VecDeque::from([edge.unique_first, edge.shared[0], edge.shared[1], edge.new_vertex]),
            faces: VecDeque::from([first, second]),
        }
    }

    /// 当前的种子顶点，仅在长度为 4 时有值
    pub fn seed_vertices(&self) -> Option<[VertexIndex; 4]> {
        match self.vertices.len() {
            4 => Some([self.vertices[0], self.vertices[1], self.vertices[2], self.vertices[3]]),
            _ => None,
        }
    }

    /// 把第三个面接到种子上
    pub fn attach_seed(&mut self, face: Face, attachment: &StripAttachment) {
        if attachment.swap_inner {
            self.vertices.swap(1, 2);
        }
        self.extend(attachment.end, attachment.new_vertex, face);
    }

    /// 在一端追加一个顶点及其带来的面
    pub fn extend(&mut self, end: End, vertex: VertexIndex, face: Face) {
        match end {
            End::Leading => {
                self.vertices.push_front(vertex);
                self.faces.push_front(face);
            }
            End::Trailing => {
                self.vertices.push_back(vertex);
                self.faces.push_back(face);
            }
        }
    }

    pub fn leading_end(&self) -> StripEnd {
        StripEnd {
            edge: [self.vertices[0].position_idx, self.vertices[1].position_idx],
            apex: self.vertices[2].position_idx,
        }
    }

    pub fn trailing_end(&self) -> StripEnd {
        let n = self.vertices.len();
        StripEnd {
            edge: [self.vertices[n - 1].position_idx, self.vertices[n - 2].position_idx],
            apex: self.vertices[n - 3].position_idx,
        }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// 完成构建并统一绕序
    ///
    /// 以三角形 0 与其输入面比较；不一致且长度为奇数时翻转整个序列，
    /// 翻转后每个三角形的绕序都会反过来，而三角形集合不变。
    pub fn finish(self) -> TriangleStrip {
        let mut strip = TriangleStrip {
            vertices: self.vertices.into(),
            faces: self.faces.into(),
            winding_reversed: false,
        };

        let matches_face = strip
            .oriented_triangle(0)
            .map(|t| strip.faces[0].same_winding([t[0].position_idx, t[1].position_idx, t[2].position_idx]))
            .unwrap_or(true);

        if !matches_face {
            if strip.vertices.len() % 2 == 1 {
                strip.vertices.reverse();
                strip.faces.reverse();
            } else {
                strip.winding_reversed = true;
            }
        }

        strip
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(t: [VertexIndex; 3]) -> [u32; 3] {
        t.map(|v| v.position_idx)
    }

    fn seed_match(first: [u32; 3], shared: [u32; 2], new_vertex: u32) -> EdgeMatch {
        EdgeMatch {
            pool_index: 0,
            unique_first: VertexIndex::new(first[0]),
            shared: shared.map(VertexIndex::new),
            new_vertex: VertexIndex::new(new_vertex),
        }
    }

    #[test]
    fn test_seed_keeps_first_face_winding() {
        let first = Face::from_positions(1, 5, 0);
        let second = Face::from_positions(0, 5, 4);
        let strip = StripBuilder::seed(first, second, &seed_match([1, 5, 0], [5, 0], 4)).finish();

        assert_eq!(strip.position_indices(), vec![1, 5, 0, 4]);
        assert!(!strip.winding_reversed());
        assert!(first.same_winding(positions(strip.oriented_triangle(0).unwrap())));
        assert!(second.same_winding(positions(strip.oriented_triangle(1).unwrap())));
    }

    #[test]
    fn test_attach_seed_with_swap() {
        let first = Face::from_positions(1, 5, 0);
        let second = Face::from_positions(0, 5, 4);
        let mut builder = StripBuilder::seed(first, second, &seed_match([1, 5, 0], [5, 0], 4));

        // 第三个面与 F1 共享边 (0, 1)
        let third = Face::from_positions(1, 0, 9);
        builder.attach_seed(
            third,
            &StripAttachment {
                pool_index: 0,
                end: End::Leading,
                swap_inner: true,
                new_vertex: VertexIndex::new(9),
            },
        );
        let strip = builder.finish();

        assert_eq!(strip.position_indices(), vec![9, 1, 0, 5, 4]);
        assert!(!strip.winding_reversed());
        for (i, face) in strip.faces().iter().enumerate() {
            assert!(face.same_winding(positions(strip.oriented_triangle(i).unwrap())));
        }
    }

    #[test]
    fn test_finish_reverses_odd_strip() {
        let first = Face::from_positions(1, 5, 0);
        let second = Face::from_positions(0, 5, 4);
        let mut builder = StripBuilder::seed(first, second, &seed_match([1, 5, 0], [5, 0], 4));

        // 与 F1 共享边 (1, 5)：头部插入后整条带绕序相反
        builder.extend(End::Leading, VertexIndex::new(6), Face::from_positions(1, 6, 5));
        let strip = builder.finish();

        assert_eq!(strip.position_indices(), vec![4, 0, 5, 1, 6]);
        assert!(!strip.winding_reversed());
        for (i, face) in strip.faces().iter().enumerate() {
            assert!(face.same_winding(positions(strip.oriented_triangle(i).unwrap())));
        }
    }

    #[test]
    fn test_finish_flags_even_strip() {
        let first = Face::from_positions(1, 5, 0);
        let second = Face::from_positions(0, 5, 4);
        let mut builder = StripBuilder::seed(first, second, &seed_match([1, 5, 0], [5, 0], 4));
        builder.extend(End::Leading, VertexIndex::new(6), Face::from_positions(1, 6, 5));
        builder.extend(End::Trailing, VertexIndex::new(3), Face::from_positions(0, 4, 3));
        let strip = builder.finish();

        assert_eq!(strip.len(), 6);
        assert!(strip.winding_reversed());
    }

    #[test]
    fn test_triangles_window() {
        let first = Face::from_positions(0, 1, 2);
        let second = Face::from_positions(2, 1, 3);
        let strip = StripBuilder::seed(first, second, &seed_match([0, 1, 2], [1, 2], 3)).finish();

        let triangles: Vec<[u32; 3]> = strip.triangles().map(positions).collect();
        assert_eq!(triangles, vec![[0, 1, 2], [1, 2, 3]]);
        assert_eq!(strip.triangle_count(), 2);
        assert_eq!(positions(strip.oriented_triangle(1).unwrap()), [2, 1, 3]);
        assert!(strip.oriented_triangle(2).is_none());
    }

    #[test]
    fn test_builder_ends() {
        let first = Face::from_positions(0, 1, 2);
        let second = Face::from_positions(2, 1, 3);
        let builder = StripBuilder::seed(first, second, &seed_match([0, 1, 2], [1, 2], 3));

        assert_eq!(builder.leading_end(), StripEnd { edge: [0, 1], apex: 2 });
        assert_eq!(builder.trailing_end(), StripEnd { edge: [3, 2], apex: 1 });
        assert_eq!(builder.len(), 4);
        assert!(builder.seed_vertices().is_some());
    }
}
