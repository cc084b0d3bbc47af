use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub api_keys: ApiKeySettings,
    pub search: SearchSettings,
    pub coupons: CouponSettings,
    pub llm: LlmSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApiKeySettings {
    pub openai: String,
    // Optional on purpose: a missing token degrades the coupon flow to
    // always-empty output instead of failing startup.
    pub accesstrade: Option<String>,
}

#[derive(serde::Deserialize, Clone)]
pub struct SearchSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_results: usize,
}

#[derive(serde::Deserialize, Clone)]
pub struct CouponSettings {
    pub endpoint: String,
    pub merchant_domain: String,
    pub free_shipping_only: bool,
}

#[derive(serde::Deserialize, Clone)]
pub struct LlmSettings {
    pub model: String,
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");

    let settings = config::Config::builder()
        .add_source(config::File::from(base_path.join("configuration.yaml")))
        // APP__API_KEYS__ACCESSTRADE=... overrides api_keys.accesstrade
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
