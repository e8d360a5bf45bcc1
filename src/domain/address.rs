//! Employee postal address and address-lookup results.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::{AppResult, FieldErrorsBuilder};

/// Postal address, one per employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub id: Uuid,
    pub user_id: Uuid,
    pub cep: String,
    pub endereco: String,
    pub numero: String,
    pub complemento: Option<String>,
    pub bairro: String,
    pub cidade: String,
    pub estado: String,
}

/// Address fields before they are attached to a user row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAddress {
    pub cep: String,
    pub endereco: String,
    pub numero: String,
    pub complemento: Option<String>,
    pub bairro: String,
    pub cidade: String,
    pub estado: String,
}

/// Result of resolving a CEP through the external lookup.
///
/// Any field may be absent: single-CEP towns have no street or district.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct AddressInfo {
    #[schema(example = "01310-100")]
    pub cep: Option<String>,
    #[schema(example = "Avenida Paulista")]
    pub endereco: Option<String>,
    #[schema(example = "Bela Vista")]
    pub bairro: Option<String>,
    #[schema(example = "São Paulo")]
    pub cidade: Option<String>,
    #[schema(example = "SP")]
    pub estado: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AddressResponse {
    pub id: Uuid,
    pub cep: String,
    pub endereco: String,
    pub numero: String,
    pub complemento: Option<String>,
    pub bairro: String,
    pub cidade: String,
    pub estado: String,
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        Self {
            id: address.id,
            cep: address.cep,
            endereco: address.endereco,
            numero: address.numero,
            complemento: address.complemento,
            bairro: address.bairro,
            cidade: address.cidade,
            estado: address.estado,
        }
    }
}

/// Address fields as submitted, before the lookup fills any gaps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressDraft {
    /// Already normalized to `00000-000`
    pub cep: String,
    pub numero: String,
    pub complemento: Option<String>,
    pub endereco: Option<String>,
    pub bairro: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl AddressDraft {
    /// Blank strings count as missing.
    pub fn new(
        cep: String,
        numero: String,
        complemento: Option<String>,
        endereco: Option<String>,
        bairro: Option<String>,
        cidade: Option<String>,
        estado: Option<String>,
    ) -> Self {
        Self {
            cep,
            numero: numero.trim().to_string(),
            complemento: present(complemento),
            endereco: present(endereco),
            bairro: present(bairro),
            cidade: present(cidade),
            estado: present(estado).map(|uf| uf.to_uppercase()),
        }
    }

    /// True when any lookup-derivable field is missing.
    pub fn needs_lookup(&self) -> bool {
        self.endereco.is_none()
            || self.bairro.is_none()
            || self.cidade.is_none()
            || self.estado.is_none()
    }

    /// Fill missing fields from a lookup result. Submitted values win.
    pub fn fill_from(&mut self, info: AddressInfo) {
        self.endereco = self.endereco.take().or(present(info.endereco));
        self.bairro = self.bairro.take().or(present(info.bairro));
        self.cidade = self.cidade.take().or(present(info.cidade));
        self.estado = self
            .estado
            .take()
            .or(present(info.estado).map(|uf| uf.to_uppercase()));
    }

    /// Validate completeness and produce the row to store.
    pub fn finish(self) -> AppResult<NewAddress> {
        let mut errors = FieldErrorsBuilder::new();
        if self.endereco.is_none() {
            errors.add("endereco", "O endereço é obrigatório");
        }
        if self.bairro.is_none() {
            errors.add("bairro", "O bairro é obrigatório");
        }
        if self.cidade.is_none() {
            errors.add("cidade", "A cidade é obrigatória");
        }
        match &self.estado {
            None => errors.add("estado", "O estado é obrigatório"),
            Some(uf) if !is_state_code(uf) => {
                errors.add("estado", "O estado deve ter 2 letras")
            }
            Some(_) => {}
        }
        errors.finish()?;

        Ok(NewAddress {
            cep: self.cep,
            endereco: self.endereco.unwrap_or_default(),
            numero: self.numero,
            complemento: self.complemento,
            bairro: self.bairro.unwrap_or_default(),
            cidade: self.cidade.unwrap_or_default(),
            estado: self.estado.unwrap_or_default(),
        })
    }
}

/// Two ASCII letters, e.g. `SP`.
pub fn is_state_code(uf: &str) -> bool {
    uf.len() == 2 && uf.chars().all(|c| c.is_ascii_alphabetic())
}
