use std::env;

#[derive(Debug, Clone)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    pub fn from_env() -> Self {
        match env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "development".to_string())
            .to_lowercase()
            .as_str()
        {
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn production_values_are_recognized() {
        unsafe { env::set_var("ENVIRONMENT", "production") };
        assert_eq!(Environment::from_env().as_str(), "production");

        unsafe { env::set_var("ENVIRONMENT", "PROD") };
        assert_eq!(Environment::from_env().as_str(), "production");

        unsafe { env::remove_var("ENVIRONMENT") };
    }

    #[test]
    #[serial]
    fn anything_else_falls_back_to_development() {
        unsafe { env::set_var("ENVIRONMENT", "staging") };
        assert_eq!(Environment::from_env().as_str(), "development");

        unsafe { env::remove_var("ENVIRONMENT") };
        assert_eq!(Environment::from_env().as_str(), "development");
    }
}
