/// OBJ 文件加载器
///
/// 使用 tobj crate 加载 Wavefront OBJ 格式的3D模型。
/// 保留 OBJ 的多重索引：每个角点分别引用位置、UV 和法线数组，
/// 条带化只依赖位置索引。
use super::MeshLoader;
use crate::core::error::{MeshLoadError, Result};
use crate::geometry::mesh::{Face, MeshData, VertexIndex};
use std::io::Cursor;
use std::path::Path;

/// OBJ 格式加载器
///
/// 实现 `MeshLoader` trait，提供 OBJ 文件的加载功能。
///
/// # 特性
///
/// - 使用 tobj crate 解析 OBJ 文件
/// - 自动三角化多边形
/// - UV 坐标翻转（V轴：1.0 - v）
/// - 多个对象合并为一个网格，索引按对象偏移
///
/// # 使用示例
///
/// ```rust,no_run
/// use mesh_strip::geometry::loaders::{MeshLoader, ObjLoader};
/// use std::path::Path;
///
/// let mesh = ObjLoader::load_from_file(Path::new("model.obj"))?;
/// println!("加载了 {} 个三角形", mesh.triangle_count());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct ObjLoader;

impl ObjLoader {
    fn load_options() -> tobj::LoadOptions {
        tobj::LoadOptions {
            triangulate: true,
            single_index: false,
            ignore_points: true,
            ignore_lines: true,
            ..Default::default()
        }
    }

    /// 把 tobj 的模型列表合并为一个 `MeshData`
    fn build_mesh(models: &[tobj::Model], name: &str) -> Result<MeshData> {
        if models.is_empty() {
            return Err(MeshLoadError::InvalidGeometry("OBJ 文件不包含任何模型".to_string()).into());
        }

        let mut mesh_data = MeshData::with_name(name);

        for model in models {
            let mesh = &model.mesh;

            if mesh.positions.len() % 3 != 0 {
                return Err(MeshLoadError::InvalidGeometry(format!(
                    "{}: 顶点位置数据不完整: {} 个浮点数",
                    model.name,
                    mesh.positions.len()
                ))
                .into());
            }
            if mesh.indices.len() % 3 != 0 {
                return Err(MeshLoadError::InvalidGeometry(format!(
                    "{}: 三角化后的索引数不是 3 的倍数: {}",
                    model.name,
                    mesh.indices.len()
                ))
                .into());
            }
            for (attribute, indices) in [("UV", &mesh.texcoord_indices), ("法线", &mesh.normal_indices)] {
                if !indices.is_empty() && indices.len() != mesh.indices.len() {
                    return Err(MeshLoadError::InvalidGeometry(format!(
                        "{}: {} 索引数 {} 与位置索引数 {} 不一致",
                        model.name,
                        attribute,
                        indices.len(),
                        mesh.indices.len()
                    ))
                    .into());
                }
            }

            let position_base = mesh_data.positions.len() as u32;
            let texcoord_base = mesh_data.texcoords.len() as u32;
            let normal_base = mesh_data.normals.len() as u32;

            mesh_data
                .positions
                .extend(mesh.positions.chunks_exact(3).map(|p| [p[0], p[1], p[2]]));
            // 翻转V坐标
            mesh_data
                .texcoords
                .extend(mesh.texcoords.chunks_exact(2).map(|t| [t[0], 1.0 - t[1]]));
            mesh_data
                .normals
                .extend(mesh.normals.chunks_exact(3).map(|n| [n[0], n[1], n[2]]));

            let corner = |i: usize| VertexIndex {
                position_idx: position_base + mesh.indices[i],
                texcoord_idx: mesh.texcoord_indices.get(i).map(|&t| texcoord_base + t),
                normal_idx: mesh.normal_indices.get(i).map(|&n| normal_base + n),
            };

            mesh_data.faces.extend(
                (0..mesh.indices.len())
                    .step_by(3)
                    .map(|i| Face::new(corner(i), corner(i + 1), corner(i + 2))),
            );

            tracing::debug!(
                model = %model.name,
                positions = mesh.positions.len() / 3,
                faces = mesh.indices.len() / 3,
                "OBJ model merged"
            );
        }

        mesh_data.validate()?;

        tracing::info!(
            "成功加载 OBJ 网格 {}: {} 个顶点, {} 个三角形, {} 个对象",
            name,
            mesh_data.vertex_count(),
            mesh_data.triangle_count(),
            models.len()
        );

        Ok(mesh_data)
    }
}

impl MeshLoader for ObjLoader {
    fn load_from_file(path: &Path) -> Result<MeshData> {
        // 检查文件是否存在
        if !path.exists() {
            return Err(MeshLoadError::FileNotFound(path.to_path_buf()).into());
        }

        // 材质文件缺失不影响几何数据，忽略 tobj 返回的材质结果
        let (models, _materials) = tobj::load_obj(path, &Self::load_options())
            .map_err(|e| MeshLoadError::ParseError(format!("tobj 解析失败: {}", e)))?;

        let name = path.file_stem().and_then(|s| s.to_str()).unwrap_or("Unnamed");
        Self::build_mesh(&models, name)
    }

    fn load_from_memory(data: &[u8]) -> Result<MeshData> {
        let mut reader = Cursor::new(data);
        let (models, _materials) =
            tobj::load_obj_buf(&mut reader, &Self::load_options(), |_| Err(tobj::LoadError::OpenFileFailed))
                .map_err(|e| MeshLoadError::ParseError(format!("tobj 解析失败: {}", e)))?;

        Self::build_mesh(&models, "Unnamed")
    }

    fn supported_extensions() -> &'static [&'static str] {
        &["obj"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const QUAD_OBJ: &str = "\
o Quad
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
v 1.0 1.0 0.0
vt 0.0 0.0
vt 1.0 0.0
vt 0.0 1.0
vt 1.0 1.0
vn 0.0 0.0 1.0
f 1/1/1 2/2/1 3/3/1
f 3/3/1 2/2/1 4/4/1
";

    #[test]
    fn test_supported_extensions() {
        let exts = ObjLoader::supported_extensions();
        assert_eq!(exts, &["obj"]);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ObjLoader::load_from_file(Path::new("nonexistent.obj"));
        assert!(matches!(
            result,
            Err(crate::core::error::MeshStripError::MeshLoading(MeshLoadError::FileNotFound(_)))
        ));
    }

    #[test]
    fn test_load_from_memory() {
        let mesh = ObjLoader::load_from_memory(QUAD_OBJ.as_bytes()).unwrap();

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.faces[0].positions(), [0, 1, 2]);
        assert_eq!(mesh.faces[1].positions(), [2, 1, 3]);
        assert_eq!(mesh.positions[3], [1.0, 1.0, 0.0]);
        assert!(mesh.faces.iter().flat_map(|f| f.vertices.iter()).all(|v| v.normal_idx == Some(0)));
    }

    #[test]
    fn test_texcoord_v_flipped() {
        let mesh = ObjLoader::load_from_memory(QUAD_OBJ.as_bytes()).unwrap();
        let corner = mesh.faces[0].vertices[2];
        let texcoord = mesh.texcoords[corner.texcoord_idx.unwrap() as usize];

        // vt 0.0 1.0 → (0.0, 0.0)
        assert_eq!(texcoord, [0.0, 0.0]);
    }

    #[test]
    fn test_quad_is_triangulated() {
        let obj = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
        let mesh = ObjLoader::load_from_memory(obj.as_bytes()).unwrap();

        assert_eq!(mesh.triangle_count(), 2);
        assert!(mesh.texcoords.is_empty());
        assert!(mesh.faces[0].vertices.iter().all(|v| v.texcoord_idx.is_none() && v.normal_idx.is_none()));
    }

    #[test]
    fn test_multiple_objects_are_offset() {
        let obj = "\
o A
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
o B
v 5 0 0
v 6 0 0
v 5 1 0
f 4 5 6
";
        let mesh = ObjLoader::load_from_memory(obj.as_bytes()).unwrap();

        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.faces[1].positions(), [3, 4, 5]);
        assert_eq!(mesh.positions[mesh.faces[1].vertices[0].position_idx as usize], [5.0, 0.0, 0.0]);
    }

    #[test]
    fn test_out_of_range_face_is_rejected() {
        let obj = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\nf 1 2 9\n";
        let result = ObjLoader::load_from_memory(obj.as_bytes());

        assert!(matches!(
            result,
            Err(crate::core::error::MeshStripError::MeshLoading(MeshLoadError::ParseError(_)))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".obj").tempfile().unwrap();
        file.write_all(QUAD_OBJ.as_bytes()).unwrap();

        let mesh = ObjLoader::load_from_file(file.path()).unwrap();
        assert_eq!(mesh.triangle_count(), 2);
        assert!(mesh.name.is_some());
    }

    #[test]
    fn test_cube_asset_stripifies() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/cube.obj");
        let mesh = ObjLoader::load_from_file(&path).unwrap();
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.triangle_count(), 12);
        assert_eq!(mesh.name.as_deref(), Some("cube"));

        let strips = crate::stripper::StripData::from_mesh(&mesh).unwrap();
        assert_eq!(strips.faces().count(), 12);
        assert!(!strips.triangle_strips.is_empty());
    }
}
