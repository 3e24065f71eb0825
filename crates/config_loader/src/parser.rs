//! 配置解析模块
//!
//! TOML 为主，JSON 备用；格式由文件扩展名决定，解析与序列化都挂在
//! [`ConfigFormat`] 上。

use std::path::Path;

use contracts::{SyncerConfig, SyncerError};

type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// 配置文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML 格式 (推荐)
    Toml,
    /// JSON 格式
    Json,
}

impl ConfigFormat {
    /// 从文件扩展名推断格式（忽略大小写）
    pub fn from_extension(ext: &str) -> Option<Self> {
        [Self::Toml, Self::Json]
            .into_iter()
            .find(|f| ext.eq_ignore_ascii_case(f.extension()))
    }

    /// 按路径推断格式
    pub fn of_path(path: &Path) -> Result<Self, SyncerError> {
        let Some(ext) = path.extension() else {
            return Err(SyncerError::config_parse(format!(
                "{} has no extension, expected .toml or .json",
                path.display()
            )));
        };
        let ext = ext.to_string_lossy();
        Self::from_extension(&ext)
            .ok_or_else(|| SyncerError::config_parse(format!("unsupported config format: .{ext}")))
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Toml => "toml",
            Self::Json => "json",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Toml => "TOML",
            Self::Json => "JSON",
        }
    }

    /// 解析配置文本；缺省的 section 取默认值，不做校验
    pub fn parse(self, content: &str) -> Result<SyncerConfig, SyncerError> {
        let parsed: Result<SyncerConfig, BoxedError> = match self {
            Self::Toml => toml::from_str(content).map_err(Into::into),
            Self::Json => serde_json::from_str(content).map_err(Into::into),
        };
        parsed.map_err(|source| SyncerError::ConfigParse {
            message: format!("{} parse error: {source}", self.label()),
            source: Some(source),
        })
    }

    /// 序列化为本格式的文本，[`ConfigFormat::parse`] 可原样读回
    pub fn render(self, config: &SyncerConfig) -> Result<String, SyncerError> {
        let rendered = match self {
            Self::Toml => toml::to_string_pretty(config).map_err(|e| e.to_string()),
            Self::Json => serde_json::to_string_pretty(config).map_err(|e| e.to_string()),
        };
        rendered.map_err(|e| {
            SyncerError::config_parse(format!("{} serialize error: {e}", self.label()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_toml_full() {
        let content = r#"
[sensors]
rgb = "rgb_gray_img.png"
flood = "flood_depth_pc.csv"
spot = "spot_depth_pc.exr"

[output]
frame_index_width = 6
report_path = "out/report.csv"

[metrics]
textfile_path = "out/frame_syncer.prom"
"#;
        let result = ConfigFormat::Toml.parse(content);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.sensors.flood, "flood_depth_pc.csv");
        assert_eq!(config.output.frame_index_width, 6);
        assert_eq!(config.output.report_path, PathBuf::from("out/report.csv"));
        assert_eq!(
            config.metrics.textfile_path,
            Some(PathBuf::from("out/frame_syncer.prom"))
        );
    }

    #[test]
    fn test_parse_toml_partial_sections() {
        let config = ConfigFormat::Toml.parse("[output]\nframe_index_width = 10\n").unwrap();
        assert_eq!(config.output.frame_index_width, 10);
        assert_eq!(config.output.report_path, PathBuf::from("./report.csv"));
        assert_eq!(config.sensors.rgb, "rgb_gray_img.png");
    }

    #[test]
    fn test_parse_json_minimal() {
        let content = r#"{
            "sensors": { "spot": "spot_depth_pc.tiff" },
            "output": { "report_path": "sync.csv" }
        }"#;
        let result = ConfigFormat::Json.parse(content);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.sensors.spot, "spot_depth_pc.tiff");
        assert_eq!(config.output.frame_index_width, 8);
    }

    #[test]
    fn test_parse_toml_syntax_error() {
        let content = "invalid toml [[[";
        let result = ConfigFormat::Toml.parse(content);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, SyncerError::ConfigParse { .. }));
    }

    #[test]
    fn test_parse_toml_wrong_type() {
        let result = ConfigFormat::Toml.parse("[output]\nframe_index_width = \"eight\"\n");
        assert!(matches!(result, Err(SyncerError::ConfigParse { .. })));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ConfigFormat::from_extension("toml"),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_extension("TOML"),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_extension("json"),
            Some(ConfigFormat::Json)
        );
        assert_eq!(ConfigFormat::from_extension("yaml"), None);
    }

    #[test]
    fn test_format_of_path() {
        assert_eq!(
            ConfigFormat::of_path(Path::new("conf/syncer.Json")).unwrap(),
            ConfigFormat::Json
        );

        let err = ConfigFormat::of_path(Path::new("conf/syncer")).unwrap_err();
        assert!(err.to_string().contains("has no extension"), "got: {err}");

        let err = ConfigFormat::of_path(Path::new("syncer.yaml")).unwrap_err();
        assert!(err.to_string().contains("unsupported config format: .yaml"));
    }

    #[test]
    fn test_render_reads_back() {
        let config = SyncerConfig::default();
        for format in [ConfigFormat::Toml, ConfigFormat::Json] {
            let text = format.render(&config).unwrap();
            assert_eq!(format.parse(&text).unwrap(), config, "{format:?}");
        }
    }
}
