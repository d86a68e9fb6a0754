//! 配置管理模块
//!
//! 提供配置的加载、解析和管理功能。
//! 支持从 TOML 配置文件加载，也支持命令行参数覆盖。
//!
//! # 配置文件格式 (config.toml)
//!
//! ```toml
//! [input]
//! path = "assets/cube.obj"
//!
//! [stripper]
//! output = "strips.toml"   # 可选，写出条带划分结果
//!
//! [logging]
//! level = "info"      # trace, debug, info, warn, error
//! file_output = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, Result};

/// 程序配置
///
/// 可以从配置文件加载，也可以通过代码构建。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// 输入网格配置
    #[serde(default)]
    pub input: InputConfig,

    /// 条带化配置
    #[serde(default)]
    pub stripper: StripperConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 输入网格配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// 模型文件路径
    #[serde(default = "default_input_path")]
    pub path: String,
}

/// 条带化配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripperConfig {
    /// 条带划分结果的输出路径（TOML），为空则不写出
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// 是否输出到文件
    #[serde(default = "default_file_output")]
    pub file_output: bool,

    /// 日志文件路径
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::str::FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                reason: format!("unknown log level '{}'", other),
            }),
        }
    }
}

// 默认值函数
fn default_input_path() -> String { "assets/cube.obj".to_string() }
fn default_log_level() -> LogLevel { LogLevel::Info }
fn default_file_output() -> bool { false }
fn default_log_file() -> String { "mesh_strip.log".to_string() }

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: default_input_path(),
        }
    }
}

impl Default for StripperConfig {
    fn default() -> Self {
        Self { output: None }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: default_file_output(),
            log_file: default_log_file(),
        }
    }
}

impl Config {
    /// 从配置文件加载
    ///
    /// # 示例
    ///
    /// ```no_run
    /// use mesh_strip::core::Config;
    ///
    /// let config = Config::from_file("config.toml")?;
    /// # Ok::<(), mesh_strip::core::MeshStripError>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let contents = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path_str.clone()))?;

        Self::from_toml_str(&contents)
    }

    /// 从 TOML 文本解析配置
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// 从配置文件加载，如果文件不存在则使用默认配置
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::from_file(path).unwrap_or_default()
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// 从命令行参数覆盖配置
    ///
    /// 支持的参数：
    /// - `--input <path>`: 输入模型文件
    /// - `--output <path>`: 写出条带划分结果
    /// - `--log-level <level>`: 日志级别
    ///
    /// 第一个不以 `--` 开头且不属于任何选项的参数也被视为输入路径。
    pub fn apply_args<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

        if let Some(idx) = args.iter().position(|a| a == "--input") {
            if let Some(path) = args.get(idx + 1) {
                self.input.path = path.clone();
            }
        } else if let Some(path) = positional_arg(&args) {
            self.input.path = path.to_string();
        }

        if let Some(idx) = args.iter().position(|a| a == "--output") {
            if let Some(path) = args.get(idx + 1) {
                self.stripper.output = Some(path.clone());
            }
        }

        if let Some(idx) = args.iter().position(|a| a == "--log-level") {
            if let Some(level) = args.get(idx + 1).and_then(|s| s.parse().ok()) {
                self.logging.level = level;
            }
        }
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if self.input.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "input.path".to_string(),
                reason: "Input path must not be empty".to_string(),
            }.into());
        }

        if let Some(output) = &self.stripper.output {
            if output.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "stripper.output".to_string(),
                    reason: "Output path must not be empty when set".to_string(),
                }.into());
            }
        }

        if self.logging.file_output && self.logging.log_file.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "logging.log_file".to_string(),
                reason: "Log file path is required when file output is enabled".to_string(),
            }.into());
        }

        Ok(())
    }
}

/// 跳过程序名与带值选项后的第一个位置参数
fn positional_arg(args: &[String]) -> Option<&str> {
    const VALUE_FLAGS: [&str; 3] = ["--input", "--output", "--log-level"];

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            iter.next();
            continue;
        }
        if !arg.starts_with("--") {
            return Some(arg);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.input.path, "assets/cube.obj");
        assert!(config.stripper.output.is_none());
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.input.path = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.stripper.output = Some(String::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = Config::from_toml_str(
            r#"
            [stripper]
            output = "strips.toml"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.stripper.output.as_deref(), Some("strips.toml"));
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.input.path, "assets/cube.obj");
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = Config::from_toml_str("[logging]\nlevel = \"loud\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_args() {
        let mut config = Config::default();
        config.apply_args([
            "mesh_strip",
            "--input",
            "models/bunny.obj",
            "--output",
            "out.toml",
            "--log-level",
            "trace",
        ]);

        assert_eq!(config.input.path, "models/bunny.obj");
        assert_eq!(config.stripper.output.as_deref(), Some("out.toml"));
        assert_eq!(config.logging.level, LogLevel::Trace);
    }

    #[test]
    fn test_unknown_flags_are_ignored() {
        let mut config = Config::default();
        config.apply_args(["mesh_strip", "--no-validate", "--verbose"]);

        assert_eq!(config.input.path, "assets/cube.obj");
        assert!(config.stripper.output.is_none());

        // 旧配置文件里多余的键不影响解析
        let config = Config::from_toml_str("[stripper]\nvalidate = false\n").unwrap();
        assert!(config.stripper.output.is_none());
    }

    #[test]
    fn test_apply_positional_input() {
        let mut config = Config::default();
        config.apply_args(["mesh_strip", "--log-level", "warn", "teapot.obj"]);

        assert_eq!(config.input.path, "teapot.obj");
        assert_eq!(config.logging.level, LogLevel::Warn);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.input.path = "grid.obj".to_string();
        config.stripper.output = Some("grid-strips.toml".to_string());
        config.save_to_file(&path).unwrap();

        let reloaded = Config::from_file(&path).unwrap();
        assert_eq!(reloaded.input.path, "grid.obj");
        assert_eq!(reloaded.stripper.output.as_deref(), Some("grid-strips.toml"));
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let config = Config::from_file_or_default("does/not/exist.toml");
        assert_eq!(config.input.path, "assets/cube.obj");
    }
}
