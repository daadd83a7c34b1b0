use serde::{Deserialize, Serialize};

/// Credenciales; la sesión queda en cookies httpOnly que emite el backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.username.trim().is_empty() {
            return Err("Ingrese el usuario".into());
        }
        if self.password.is_empty() {
            return Err("Ingrese la contraseña".into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    #[serde(rename = "nombre", default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "rol", default)]
    pub role: Option<String>,
}

impl UserInfo {
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

/// Тело ответа об ошибке: бэкенд отдаёт `message` или `error`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiMessage {
    pub fn text(self) -> Option<String> {
        let non_empty = |m: &String| !m.trim().is_empty();
        self.message.filter(non_empty).or(self.error.filter(non_empty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_validation() {
        let req = LoginRequest { username: " ".into(), password: "x".into() };
        assert_eq!(req.validate().unwrap_err(), "Ingrese el usuario");

        let req = LoginRequest { username: "caja1".into(), password: String::new() };
        assert_eq!(req.validate().unwrap_err(), "Ingrese la contraseña");

        let req = LoginRequest { username: "caja1".into(), password: "secreta".into() };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let mut user = UserInfo {
            id: 1,
            username: "caja1".into(),
            full_name: None,
            email: None,
            role: Some("admin".into()),
        };
        assert_eq!(user.display_name(), "caja1");

        user.full_name = Some("María López".into());
        assert_eq!(user.display_name(), "María López");
    }

    #[test]
    fn test_api_message_text() {
        let m: ApiMessage = serde_json::from_str(r#"{"error":"Stock insuficiente"}"#).unwrap();
        assert_eq!(m.text().as_deref(), Some("Stock insuficiente"));

        let m: ApiMessage = serde_json::from_str(r#"{"message":"","error":null}"#).unwrap();
        assert_eq!(m.text(), None);
    }
}
