/// 几何缓冲构建模块
///
/// 把条带化结果展开为交错顶点数组，供渲染器直接上传：
/// 所有浮动三角形合并为一个三角形列表缓冲，每条条带各占一个条带缓冲。
///
/// # 数据流
///
/// ```text
/// MeshData ──→ StripData ──→ MeshBuffers
///   (面)         (划分)        (Vec<GeometryBuffer>)
/// ```

use crate::core::error::Result;
use crate::geometry::mesh::{MeshData, VertexIndex};
use crate::geometry::vertex::Vertex;
use crate::stripper::StripData;

/// 图元拓扑
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveTopology {
    TriangleList,
    TriangleStrip,
}

/// 单个待上传的顶点缓冲
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryBuffer {
    /// 绘制时使用的图元拓扑
    pub topology: PrimitiveTopology,

    /// 交错顶点数据
    pub vertices: Vec<Vertex>,

    /// 绘制时需要反转正面朝向（见 `TriangleStrip::winding_reversed`）
    pub front_face_reversed: bool,
}

impl GeometryBuffer {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// 顶点数据的字节视图
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// 一个网格的全部几何缓冲
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    buffers: Vec<GeometryBuffer>,
}

impl MeshBuffers {
    /// 条带化网格并展开为几何缓冲
    pub fn from_mesh(mesh: &MeshData) -> Result<Self> {
        let strips = StripData::from_mesh(mesh)?;
        Self::build(mesh, &strips)
    }

    /// 按已有的条带化结果展开
    ///
    /// `strips` 必须来自同一个网格。缺省的 UV / 法线索引按 0 处理；
    /// 对应属性数组为空时使用零向量。
    pub fn build(mesh: &MeshData, strips: &StripData) -> Result<Self> {
        mesh.validate()?;

        let mut buffers = Vec::with_capacity(strips.triangle_strips.len() + 1);

        if !strips.floating_triangles.is_empty() {
            let vertices = strips
                .floating_triangles
                .iter()
                .flat_map(|face| face.vertices.iter())
                .map(|v| resolve_vertex(mesh, v))
                .collect();
            buffers.push(GeometryBuffer {
                topology: PrimitiveTopology::TriangleList,
                vertices,
                front_face_reversed: false,
            });
        }

        for strip in &strips.triangle_strips {
            buffers.push(GeometryBuffer {
                topology: PrimitiveTopology::TriangleStrip,
                vertices: strip.vertices().iter().map(|v| resolve_vertex(mesh, v)).collect(),
                front_face_reversed: strip.winding_reversed(),
            });
        }

        tracing::debug!(
            buffers = buffers.len(),
            bytes = buffers.iter().map(|b| b.as_bytes().len()).sum::<usize>(),
            "Geometry buffers built"
        );

        Ok(Self { buffers })
    }

    pub fn buffers(&self) -> &[GeometryBuffer] {
        &self.buffers
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// 所有缓冲的顶点总数
    pub fn total_vertices(&self) -> usize {
        self.buffers.iter().map(|b| b.vertex_count()).sum()
    }
}

fn resolve_vertex(mesh: &MeshData, index: &VertexIndex) -> Vertex {
    let texcoord = index.texcoord_idx.unwrap_or(0) as usize;
    let normal = index.normal_idx.unwrap_or(0) as usize;
    Vertex {
        position: mesh.positions.get(index.position_idx as usize).copied().unwrap_or_default(),
        texcoord: mesh.texcoords.get(texcoord).copied().unwrap_or_default(),
        normal: mesh.normals.get(normal).copied().unwrap_or_default(),
    }
}
