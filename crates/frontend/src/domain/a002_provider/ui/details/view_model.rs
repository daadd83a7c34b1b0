use contracts::domain::a002_provider::ProviderDto;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct ProviderDetailsViewModel {
    pub form: RwSignal<ProviderDto>,
    pub error: RwSignal<Option<String>>,
}

impl ProviderDetailsViewModel {
    pub fn new(initial: ProviderDto) -> Self {
        Self {
            form: RwSignal::new(initial),
            error: RwSignal::new(None),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.form.with(|f| f.is_edit())
    }

    pub fn build(&self) -> Result<ProviderDto, String> {
        let dto = self.form.get_untracked();
        dto.validate()?;
        Ok(dto.normalized())
    }

    pub fn submit_command(&self, on_submit: Callback<ProviderDto>) {
        match self.build() {
            Ok(dto) => {
                self.error.set(None);
                on_submit.run(dto);
            }
            Err(msg) => self.error.set(Some(msg)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_normalizes_cuit() {
        let owner = Owner::new();
        owner.with(|| {
            let vm = ProviderDetailsViewModel::new(ProviderDto {
                name: "  Distribuidora Norte ".into(),
                cuit: Some("20-12345678-6".into()),
                phone: Some("  ".into()),
                ..Default::default()
            });
            let dto = vm.build().unwrap();
            assert_eq!(dto.name, "Distribuidora Norte");
            assert_eq!(dto.cuit.as_deref(), Some("20123456786"));
            assert_eq!(dto.phone, None);
        });
    }

    #[test]
    fn test_build_rejects_bad_cuit() {
        let owner = Owner::new();
        owner.with(|| {
            let vm = ProviderDetailsViewModel::new(ProviderDto {
                name: "Proveedor".into(),
                cuit: Some("20-12345678-0".into()),
                ..Default::default()
            });
            assert_eq!(vm.build(), Err("El CUIT no es válido".to_string()));
        });
    }
}
