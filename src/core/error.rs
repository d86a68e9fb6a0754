//! 错误处理模块
//!
//! 定义了库中使用的统一错误类型，手动实现 `Display` 与 `Error`。
//!
//! # 设计原则
//!
//! - 为每种错误类型提供清晰的上下文信息
//! - 支持错误链（error source）
//! - 易于模式匹配和错误处理
//! - 条带化要么完全成功，要么在修改任何输出之前失败

use std::fmt;
use std::path::PathBuf;

/// 统一的 Result 类型
///
/// 所有可能返回错误的函数都应该使用这个类型。
pub type Result<T> = std::result::Result<T, MeshStripError>;

/// mesh_strip 的错误类型
#[derive(Debug)]
pub enum MeshStripError {
    /// 配置错误
    Config(ConfigError),

    /// 网格加载错误
    MeshLoading(MeshLoadError),

    /// 网格数据错误（条带化之前的输入校验）
    Mesh(MeshError),

    /// IO 错误
    Io(std::io::Error),

    /// 日志系统错误
    Log(String),
}

/// 配置相关的错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置文件未找到
    FileNotFound(String),

    /// 配置文件解析失败
    ParseError(String),

    /// 配置值无效
    InvalidValue { field: String, reason: String },
}

/// 网格加载相关的错误
#[derive(Debug)]
pub enum MeshLoadError {
    /// 文件不存在
    FileNotFound(PathBuf),

    /// 不支持的文件格式
    UnsupportedFormat(String),

    /// 解析失败
    ParseError(String),

    /// 几何数据无效
    InvalidGeometry(String),
}

/// 面引用的顶点属性种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexAttribute {
    Position,
    TexCoord,
    Normal,
}

impl VertexAttribute {
    pub fn name(&self) -> &'static str {
        match self {
            VertexAttribute::Position => "position",
            VertexAttribute::TexCoord => "texcoord",
            VertexAttribute::Normal => "normal",
        }
    }
}

/// 网格数据错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// 某个面的索引超出对应属性数组的范围
    MalformedMesh {
        /// 面在输入中的序号
        face: usize,
        /// 面内的角（0..3）
        corner: usize,
        /// 越界的属性
        attribute: VertexAttribute,
        /// 越界的索引值
        index: u32,
        /// 属性数组的长度
        len: usize,
    },
}

impl fmt::Display for MeshStripError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshStripError::Config(e) => write!(f, "Configuration error: {}", e),
            MeshStripError::MeshLoading(e) => write!(f, "Mesh loading error: {}", e),
            MeshStripError::Mesh(e) => write!(f, "Mesh error: {}", e),
            MeshStripError::Io(e) => write!(f, "IO error: {}", e),
            MeshStripError::Log(msg) => write!(f, "Log error: {}", msg),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl fmt::Display for MeshLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshLoadError::FileNotFound(path) => write!(f, "Mesh file not found: {}", path.display()),
            MeshLoadError::UnsupportedFormat(msg) => write!(f, "Unsupported mesh format: {}", msg),
            MeshLoadError::ParseError(msg) => write!(f, "Failed to parse mesh: {}", msg),
            MeshLoadError::InvalidGeometry(msg) => write!(f, "Invalid geometry data: {}", msg),
        }
    }
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshError::MalformedMesh {
                face,
                corner,
                attribute,
                index,
                len,
            } => write!(
                f,
                "Malformed mesh: face {} corner {} references {} index {} (array length {})",
                face,
                corner,
                attribute.name(),
                index,
                len
            ),
        }
    }
}

impl std::error::Error for MeshStripError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MeshStripError::Io(e) => Some(e),
            MeshStripError::Config(e) => Some(e),
            MeshStripError::MeshLoading(e) => Some(e),
            MeshStripError::Mesh(e) => Some(e),
            MeshStripError::Log(_) => None,
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for MeshLoadError {}
impl std::error::Error for MeshError {}

// 实现 From trait 以便于错误转换
impl From<std::io::Error> for MeshStripError {
    fn from(err: std::io::Error) -> Self {
        MeshStripError::Io(err)
    }
}

impl From<ConfigError> for MeshStripError {
    fn from(err: ConfigError) -> Self {
        MeshStripError::Config(err)
    }
}

impl From<MeshLoadError> for MeshStripError {
    fn from(err: MeshLoadError) -> Self {
        MeshStripError::MeshLoading(err)
    }
}

impl From<MeshError> for MeshStripError {
    fn from(err: MeshError) -> Self {
        MeshStripError::Mesh(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_mesh_display() {
        let err = MeshError::MalformedMesh {
            face: 3,
            corner: 1,
            attribute: VertexAttribute::Normal,
            index: 9,
            len: 4,
        };
        let text = err.to_string();
        assert!(text.contains("face 3"));
        assert!(text.contains("normal index 9"));
        assert!(text.contains("array length 4"));
    }

    #[test]
    fn test_error_conversion_keeps_source() {
        let err: MeshStripError = ConfigError::ParseError("bad".to_string()).into();
        assert!(matches!(err, MeshStripError::Config(_)));
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
