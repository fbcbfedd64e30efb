use crate::adapters::DirectorySource;
use crate::core::options::{BusinessMapOptions, MapOptions};
use crate::utils::error::{BizMapError, Result};
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_path, validate_range,
    validate_required_field, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: Option<SourceConfig>,
    #[serde(default)]
    pub map: MapOptions,
    #[serde(default)]
    pub business_map: BusinessMapOptions,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub r#type: String,
    pub path: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
}

const SOURCE_TYPES: [&str; 3] = ["csv", "json", "http"];

impl SourceConfig {
    /// 從 `--source` 參數推斷來源：http(s) 網址或本地檔案
    pub fn from_location(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            return Self {
                r#type: "http".to_string(),
                path: None,
                endpoint: Some(location.to_string()),
                timeout_seconds: None,
            };
        }

        let r#type = Path::new(location)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        Self {
            r#type,
            path: Some(location.to_string()),
            endpoint: None,
            timeout_seconds: None,
        }
    }

    pub fn open(&self) -> Result<DirectorySource> {
        self.validate()?;

        match self.r#type.as_str() {
            "http" => {
                let endpoint = validate_required_field("source.endpoint", &self.endpoint)?;
                let timeout = Duration::from_secs(
                    self.timeout_seconds
                        .unwrap_or(crate::adapters::http::DEFAULT_TIMEOUT_SECONDS),
                );
                Ok(DirectorySource::Http(crate::adapters::HttpDirectory::with_timeout(
                    endpoint.clone(),
                    timeout,
                )?))
            }
            _ => {
                let path = validate_required_field("source.path", &self.path)?;
                Ok(DirectorySource::File(crate::adapters::FileDirectory::new(path)))
            }
        }
    }
}

impl Validate for SourceConfig {
    fn validate(&self) -> Result<()> {
        if !SOURCE_TYPES.contains(&self.r#type.as_str()) {
            return Err(BizMapError::InvalidConfigValueError {
                field: "source.type".to_string(),
                value: self.r#type.clone(),
                reason: format!("Unsupported source type. Valid types: {}", SOURCE_TYPES.join(", ")),
            });
        }

        if self.r#type == "http" {
            let endpoint = validate_required_field("source.endpoint", &self.endpoint)?;
            validate_url("source.endpoint", endpoint)?;
            if let Some(timeout) = self.timeout_seconds {
                validate_range("source.timeout_seconds", timeout, 1, 300)?;
            }
        } else {
            let path = validate_required_field("source.path", &self.path)?;
            validate_path("source.path", path)?;
            validate_file_extension("source.path", path, &["csv", "json"])?;
        }

        Ok(())
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BizMapError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| BizMapError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DIRECTORY_URL})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::OnceLock;

        static PATTERN: OnceLock<Regex> = OnceLock::new();
        let re = PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static pattern"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn output_path(&self) -> Option<&str> {
        self.output.as_ref().map(|o| o.path.as_str())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(source) = &self.source {
            source.validate()?;
        }

        self.map.validate()?;

        // id 由命令列提供，這裡只檢查預設值
        validate_non_empty_string("business_map.height", &self.business_map.height)?;
        validate_range("business_map.zoom", self.business_map.zoom, 1, 20)?;

        if let Some(output) = &self.output {
            validate_path("output.path", &output.path)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[source]
type = "csv"
path = "businesses.csv"

[map]
limit = 50
height = "500px"
zoom = 14
clustering = false
class = "front-page"
category = "restaurants"

[business_map]
zoom = 16

[output]
path = "./maps"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.source.as_ref().unwrap().r#type, "csv");
        assert_eq!(config.map.limit, 50);
        assert_eq!(config.map.height, "500px");
        assert!(!config.map.clustering);
        assert_eq!(config.map.category.as_deref(), Some("restaurants"));
        assert_eq!(config.business_map.zoom, 16);
        assert_eq!(config.business_map.height, "400px");
        assert_eq!(config.output_path(), Some("./maps"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sections_default_when_missing() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.source.is_none());
        assert_eq!(config.map, MapOptions::default());
        assert_eq!(config.business_map.zoom, 15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("BIZMAP_TEST_DIRECTORY_URL", "https://directory.example.com/businesses");

        let toml_content = r#"
[source]
type = "http"
endpoint = "${BIZMAP_TEST_DIRECTORY_URL}"
timeout_seconds = 5
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.source.unwrap().endpoint.as_deref(),
            Some("https://directory.example.com/businesses")
        );

        std::env::remove_var("BIZMAP_TEST_DIRECTORY_URL");
    }

    #[test]
    fn test_config_validation() {
        let bad_zoom = TomlConfig::from_toml_str("[map]\nzoom = 30\n").unwrap();
        assert!(bad_zoom.validate().is_err());

        let bad_endpoint =
            TomlConfig::from_toml_str("[source]\ntype = \"http\"\nendpoint = \"invalid-url\"\n").unwrap();
        assert!(bad_endpoint.validate().is_err());

        let bad_type =
            TomlConfig::from_toml_str("[source]\ntype = \"xml\"\npath = \"a.xml\"\n").unwrap();
        assert!(bad_type.validate().is_err());

        let missing_path = TomlConfig::from_toml_str("[source]\ntype = \"csv\"\n").unwrap();
        assert!(matches!(
            missing_path.validate(),
            Err(BizMapError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_source_from_location() {
        let http = SourceConfig::from_location("https://example.com/wp-json/businesses");
        assert_eq!(http.r#type, "http");
        assert!(http.validate().is_ok());

        let csv = SourceConfig::from_location("exports/Businesses.CSV");
        assert_eq!(csv.r#type, "csv");
        assert!(csv.validate().is_ok());

        let unknown = SourceConfig::from_location("exports/businesses.txt");
        assert!(unknown.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[source]\ntype = \"json\"\npath = \"businesses.json\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.source.unwrap().path.as_deref(), Some("businesses.json"));
    }
}
