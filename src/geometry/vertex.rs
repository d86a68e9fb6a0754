/// 几何体顶点定义模块
///
/// 定义交给渲染器上传的交错顶点结构，包含位置、UV坐标和法线。

use bytemuck::{Pod, Zeroable};

/// 交错顶点结构
///
/// 内存布局与GPU兼容，使用 `#[repr(C)]` 保证顺序和对齐。
///
/// # 内存布局
///
/// - position: 12 bytes (3 * f32)
/// - texcoord: 8 bytes (2 * f32)
/// - normal: 12 bytes (3 * f32)
/// - **总计**: 32 bytes
///
/// # 示例
///
/// ```rust
/// use mesh_strip::geometry::vertex::Vertex;
///
/// let vertex = Vertex {
///     position: [0.0, 1.0, 0.0],
///     texcoord: [0.5, 0.5],
///     normal: [0.0, 1.0, 0.0],
/// };
/// ```
#[repr(C)]
#[derive(Default, Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// 顶点位置 (x, y, z)
    pub position: [f32; 3],

    /// 纹理坐标 (u, v)
    pub texcoord: [f32; 2],

    /// 法线向量 (nx, ny, nz)
    pub normal: [f32; 3],
}

impl Vertex {
    /// 每个属性的分量数，按布局顺序：位置、UV、法线
    pub const ATTRIBUTE_COMPONENTS: [usize; 3] = [3, 2, 3];

    #[inline]
    pub fn new(position: [f32; 3], texcoord: [f32; 2], normal: [f32; 3]) -> Self {
        Self {
            position,
            texcoord,
            normal,
        }
    }

    /// 顶点步长（字节）
    #[inline]
    pub const fn stride() -> usize {
        std::mem::size_of::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn test_vertex_size() {
        // 3*4 + 2*4 + 3*4 = 32 bytes
        assert_eq!(size_of::<Vertex>(), 32);
        assert_eq!(Vertex::stride(), 32);
        assert_eq!(Vertex::ATTRIBUTE_COMPONENTS.iter().sum::<usize>() * 4, 32);
    }

    #[test]
    fn test_vertex_alignment() {
        assert_eq!(std::mem::align_of::<Vertex>(), 4);
    }

    #[test]
    fn test_vertex_bytes() {
        let vertices = [Vertex::new([1.0, 2.0, 3.0], [0.5, 0.25], [0.0, 0.0, 1.0])];
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);

        assert_eq!(bytes.len(), 32);
        assert_eq!(&bytes[0..4], &1.0f32.to_ne_bytes());
        assert_eq!(&bytes[12..16], &0.5f32.to_ne_bytes());
    }

    #[test]
    fn test_vertex_default() {
        let vertex = Vertex::default();

        assert_eq!(vertex.position, [0.0, 0.0, 0.0]);
        assert_eq!(vertex.texcoord, [0.0, 0.0]);
        assert_eq!(vertex.normal, [0.0, 0.0, 0.0]);
    }
}
