use serde::{Deserialize, Serialize};

use crate::domain::common::{require, AggregateRoot, EntityId};

// ============================================================================
// Aggregate Root
// ============================================================================

/// Поставщик
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id: EntityId,

    #[serde(rename = "nombre")]
    pub name: String,

    #[serde(default)]
    pub cuit: Option<String>,

    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(rename = "direccion", default)]
    pub address: Option<String>,

    #[serde(rename = "contacto", default)]
    pub contact_name: Option<String>,

    #[serde(rename = "notas", default)]
    pub notes: Option<String>,

    #[serde(rename = "activo", default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Provider {
    pub fn to_dto(&self) -> ProviderDto {
        ProviderDto {
            id: Some(self.id),
            name: self.name.clone(),
            cuit: self.cuit.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            address: self.address.clone(),
            contact_name: self.contact_name.clone(),
            notes: self.notes.clone(),
        }
    }

    pub fn apply(&mut self, dto: &ProviderDto) {
        self.name = dto.name.trim().to_string();
        self.cuit = dto.cuit.as_deref().map(normalize_cuit);
        self.phone = dto.phone.clone();
        self.email = dto.email.clone();
        self.address = dto.address.clone();
        self.contact_name = dto.contact_name.clone();
        self.notes = dto.notes.clone();
    }
}

impl AggregateRoot for Provider {
    fn id(&self) -> EntityId {
        self.id
    }

    fn collection_name() -> &'static str {
        "proveedores"
    }

    fn element_name() -> &'static str {
        "Proveedor"
    }

    fn list_name() -> &'static str {
        "Proveedores"
    }
}

// ============================================================================
// CUIT
// ============================================================================

const CUIT_WEIGHTS: [u32; 10] = [5, 4, 3, 2, 7, 6, 5, 4, 3, 2];

/// Оставляет только цифры: "20-12345678-6" -> "20123456786"
pub fn normalize_cuit(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Проверка CUIT: 11 цифр + контрольная цифра по модулю 11.
/// Допускаются дефисы и пробелы между группами.
pub fn is_valid_cuit(value: &str) -> bool {
    if value
        .chars()
        .any(|c| !(c.is_ascii_digit() || c == '-' || c == ' '))
    {
        return false;
    }

    let digits: Vec<u32> = value.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != 11 {
        return false;
    }

    let sum: u32 = digits[..10]
        .iter()
        .zip(CUIT_WEIGHTS.iter())
        .map(|(d, w)| d * w)
        .sum();

    let check = match 11 - (sum % 11) {
        11 => 0,
        10 => return false,
        n => n,
    };

    digits[10] == check
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания/обновления поставщика
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProviderDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,

    #[serde(rename = "nombre")]
    pub name: String,

    pub cuit: Option<String>,

    #[serde(rename = "telefono")]
    pub phone: Option<String>,

    pub email: Option<String>,

    #[serde(rename = "direccion")]
    pub address: Option<String>,

    #[serde(rename = "contacto")]
    pub contact_name: Option<String>,

    #[serde(rename = "notas")]
    pub notes: Option<String>,
}

impl ProviderDto {
    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    pub fn validate(&self) -> Result<(), String> {
        require(&self.name, "El nombre del proveedor es obligatorio")?;

        if let Some(cuit) = self.cuit.as_deref().map(str::trim) {
            if !cuit.is_empty() && !is_valid_cuit(cuit) {
                return Err("El CUIT no es válido".into());
            }
        }

        if let Some(email) = self.email.as_deref().map(str::trim) {
            if !email.is_empty() && !looks_like_email(email) {
                return Err("El email no es válido".into());
            }
        }

        Ok(())
    }

    /// Нормализованная копия для отправки на бэкенд
    pub fn normalized(&self) -> Self {
        let clean = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        };
        Self {
            id: self.id,
            name: self.name.trim().to_string(),
            cuit: clean(&self.cuit).map(|c| normalize_cuit(&c)),
            phone: clean(&self.phone),
            email: clean(&self.email),
            address: clean(&self.address),
            contact_name: clean(&self.contact_name),
            notes: clean(&self.notes),
        }
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .map(|(host, tld)| !host.is_empty() && !tld.is_empty())
                    .unwrap_or(false)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_cuits() {
        assert!(is_valid_cuit("20123456786"));
        assert!(is_valid_cuit("20-12345678-6"));
        assert!(is_valid_cuit("30-71234567-1"));
    }

    #[test]
    fn test_invalid_cuits() {
        assert!(!is_valid_cuit("20-12345678-5"));
        assert!(!is_valid_cuit("2012345678"));
        assert!(!is_valid_cuit("201234567860"));
        assert!(!is_valid_cuit("20.12345678.6"));
        assert!(!is_valid_cuit(""));
    }

    #[test]
    fn test_normalize_cuit() {
        assert_eq!(normalize_cuit("20-12345678-6"), "20123456786");
    }

    #[test]
    fn test_provider_validation() {
        let mut dto = ProviderDto {
            name: "Distribuidora Sur".into(),
            ..Default::default()
        };
        assert!(dto.validate().is_ok());

        dto.cuit = Some("20-12345678-0".into());
        assert_eq!(dto.validate().unwrap_err(), "El CUIT no es válido");

        dto.cuit = Some("  ".into());
        assert!(dto.validate().is_ok());

        dto.email = Some("ventas@sur".into());
        assert_eq!(dto.validate().unwrap_err(), "El email no es válido");

        dto.email = Some("ventas@sur.com.ar".into());
        assert!(dto.validate().is_ok());

        dto.name = String::new();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_normalized_drops_blank_fields() {
        let dto = ProviderDto {
            id: Some(3),
            name: "  Lácteos Norte ".into(),
            cuit: Some("30-71234567-1".into()),
            phone: Some(" ".into()),
            email: Some(" compras@norte.com ".into()),
            ..Default::default()
        };
        let n = dto.normalized();
        assert_eq!(n.name, "Lácteos Norte");
        assert_eq!(n.cuit.as_deref(), Some("30712345671"));
        assert_eq!(n.phone, None);
        assert_eq!(n.email.as_deref(), Some("compras@norte.com"));
    }
}
