/// 网格数据结构模块
///
/// 定义CPU侧的网格数据容器，存储从文件加载的原始几何数据。
/// 与合并后的顶点缓冲不同，这里的每个面保存三组独立的属性索引
/// （位置 / UV / 法线），与 OBJ 文件中的 `f v/vt/vn` 一一对应。

use serde::{Deserialize, Serialize};

use crate::core::error::{MeshError, VertexAttribute};

/// 面的一个角：位置索引加可选的 UV 和法线索引
///
/// 邻接判断只比较 `position_idx`，UV 和法线索引不参与拓扑。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VertexIndex {
    /// 位置数组中的索引
    pub position_idx: u32,

    /// UV数组中的索引（可选）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texcoord_idx: Option<u32>,

    /// 法线数组中的索引（可选）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal_idx: Option<u32>,
}

impl VertexIndex {
    /// 创建一个只有位置索引的角
    #[inline]
    pub fn new(position_idx: u32) -> Self {
        Self {
            position_idx,
            texcoord_idx: None,
            normal_idx: None,
        }
    }

    /// 创建一个带完整属性索引的角
    #[inline]
    pub fn with_attributes(position_idx: u32, texcoord_idx: Option<u32>, normal_idx: Option<u32>) -> Self {
        Self {
            position_idx,
            texcoord_idx,
            normal_idx,
        }
    }
}

impl From<u32> for VertexIndex {
    fn from(position_idx: u32) -> Self {
        Self::new(position_idx)
    }
}

/// 三角形面
///
/// 三个角按输入顺序保存，顺序即绕序。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Face {
    pub vertices: [VertexIndex; 3],
}

impl Face {
    #[inline]
    pub fn new(a: VertexIndex, b: VertexIndex, c: VertexIndex) -> Self {
        Self { vertices: [a, b, c] }
    }

    /// 从三个位置索引创建面（不带 UV 和法线）
    #[inline]
    pub fn from_positions(a: u32, b: u32, c: u32) -> Self {
        Self::new(a.into(), b.into(), c.into())
    }

    /// 三个角的位置索引
    #[inline]
    pub fn positions(&self) -> [u32; 3] {
        [
            self.vertices[0].position_idx,
            self.vertices[1].position_idx,
            self.vertices[2].position_idx,
        ]
    }

    /// 面是否包含某个位置
    #[inline]
    pub fn contains_position(&self, position_idx: u32) -> bool {
        self.vertices.iter().any(|v| v.position_idx == position_idx)
    }

    /// 退化面：三个位置索引不两两不同
    ///
    /// 退化面不参与任何邻接匹配。
    pub fn is_degenerate(&self) -> bool {
        let [a, b, c] = self.positions();
        a == b || b == c || a == c
    }

    /// 与另一个三元组是否为同一三角形（忽略绕序）
    pub fn same_triangle(&self, positions: [u32; 3]) -> bool {
        let mut lhs = self.positions();
        let mut rhs = positions;
        lhs.sort_unstable();
        rhs.sort_unstable();
        lhs == rhs
    }

    /// 与另一个有序三元组是否为同一三角形且绕序相同
    ///
    /// 绕序相同即互为循环移位。
    pub fn same_winding(&self, positions: [u32; 3]) -> bool {
        let p = self.positions();
        (0..3).any(|shift| {
            p[0] == positions[shift]
                && p[1] == positions[(shift + 1) % 3]
                && p[2] == positions[(shift + 2) % 3]
        })
    }
}

/// CPU侧网格数据
///
/// 存储从文件加载的原始网格数据：三个独立的属性数组和面列表。
/// 这是一个简单的数据持有者，不包含GPU资源。
///
/// # 示例
///
/// ```rust
/// use mesh_strip::geometry::mesh::{Face, MeshData};
///
/// let mut mesh = MeshData::with_name("Quad");
/// mesh.positions = vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]];
/// mesh.faces = vec![Face::from_positions(0, 1, 2), Face::from_positions(0, 2, 3)];
///
/// assert!(mesh.validate().is_ok());
/// assert_eq!(mesh.triangle_count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    /// 顶点位置 (x, y, z)
    pub positions: Vec<[f32; 3]>,

    /// 纹理坐标 (u, v)
    pub texcoords: Vec<[f32; 2]>,

    /// 法线向量 (nx, ny, nz)
    pub normals: Vec<[f32; 3]>,

    /// 三角形面列表，顺序即条带化时的发现顺序
    pub faces: Vec<Face>,

    /// 网格名称（可选）
    pub name: Option<String>,
}

impl MeshData {
    /// 创建一个空的网格数据
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建一个指定名称的空网格数据
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// 获取位置数量
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// 获取三角形数量
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    /// 验证所有面的索引都在对应属性数组范围内
    ///
    /// 返回遇到的第一个越界索引。
    pub fn validate(&self) -> Result<(), MeshError> {
        for (face_idx, face) in self.faces.iter().enumerate() {
            for (corner, vertex) in face.vertices.iter().enumerate() {
                check_index(face_idx, corner, VertexAttribute::Position, Some(vertex.position_idx), self.positions.len())?;
                check_index(face_idx, corner, VertexAttribute::TexCoord, vertex.texcoord_idx, self.texcoords.len())?;
                check_index(face_idx, corner, VertexAttribute::Normal, vertex.normal_idx, self.normals.len())?;
            }
        }
        Ok(())
    }

    /// 清空所有数据
    pub fn clear(&mut self) {
        self.positions.clear();
        self.texcoords.clear();
        self.normals.clear();
        self.faces.clear();
        self.name = None;
    }
}

fn check_index(
    face: usize,
    corner: usize,
    attribute: VertexAttribute,
    index: Option<u32>,
    len: usize,
) -> Result<(), MeshError> {
    match index {
        Some(index) if index as usize >= len => Err(MeshError::MalformedMesh {
            face,
            corner,
            attribute,
            index,
            len,
        }),
        _ => Ok(()),
    }
}
