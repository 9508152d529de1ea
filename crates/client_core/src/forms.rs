//! Form records edited field-by-field by the screens.

use std::str::FromStr;

use shared::{
    domain::ClientId,
    protocol::{ClientRecord, Credentials, ProjectRecord},
};

use crate::error::{FormError, ValidationError};

macro_rules! form_fields {
    ($name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Name the field carries on the wire and in input controls.
            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl FromStr for $name {
            type Err = FormError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|field| field.name() == s)
                    .ok_or_else(|| FormError::UnknownField(s.to_string()))
            }
        }
    };
}

form_fields!(ProjectField {
    Title => "title",
    Resume => "resume",
    ImportantInfos => "importantInfos",
    StartDate => "startDate",
    LimitDate => "limitDate",
    ClientId => "clientId",
    Value => "value",
});

form_fields!(ClientField {
    Name => "name",
    Email => "email",
    Phone => "phone",
});

form_fields!(CredentialsField {
    Email => "email",
    Password => "password",
});

pub trait FormRecord {
    type Field: Copy + FromStr<Err = FormError> + 'static;

    /// Checked in order; the first blank one is reported.
    const REQUIRED: &'static [Self::Field];

    /// Replaces a single field. The record is untouched on error.
    fn set_field(&mut self, field: Self::Field, value: &str) -> Result<(), FormError>;

    fn is_blank(&self, field: Self::Field) -> bool;

    fn field_name(field: Self::Field) -> &'static str;

    fn set_named(&mut self, name: &str, value: &str) -> Result<(), FormError> {
        let field = name.parse::<Self::Field>()?;
        self.set_field(field, value)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        match Self::REQUIRED.iter().copied().find(|field| self.is_blank(*field)) {
            Some(field) => Err(ValidationError::MissingField(Self::field_name(field))),
            None => Ok(()),
        }
    }
}

impl FormRecord for ProjectRecord {
    type Field = ProjectField;

    const REQUIRED: &'static [ProjectField] = &[
        ProjectField::Title,
        ProjectField::Resume,
        ProjectField::ImportantInfos,
        ProjectField::StartDate,
        ProjectField::LimitDate,
        ProjectField::ClientId,
    ];

    fn set_field(&mut self, field: ProjectField, value: &str) -> Result<(), FormError> {
        match field {
            ProjectField::Title => self.title = value.to_string(),
            ProjectField::Resume => self.resume = value.to_string(),
            ProjectField::ImportantInfos => self.important_infos = value.to_string(),
            ProjectField::StartDate => self.start_date = value.to_string(),
            ProjectField::LimitDate => self.limit_date = value.to_string(),
            ProjectField::ClientId => self.client_id = parse_client_id(value)?,
            ProjectField::Value => self.value = parse_amount(value)?,
        }
        Ok(())
    }

    fn is_blank(&self, field: ProjectField) -> bool {
        match field {
            ProjectField::Title => self.title.is_empty(),
            ProjectField::Resume => self.resume.is_empty(),
            ProjectField::ImportantInfos => self.important_infos.is_empty(),
            ProjectField::StartDate => self.start_date.is_empty(),
            ProjectField::LimitDate => self.limit_date.is_empty(),
            ProjectField::ClientId => self.client_id.is_unset(),
            ProjectField::Value => self.value == 0.0,
        }
    }

    fn field_name(field: ProjectField) -> &'static str {
        field.name()
    }
}

impl FormRecord for ClientRecord {
    type Field = ClientField;

    const REQUIRED: &'static [ClientField] = ClientField::ALL;

    fn set_field(&mut self, field: ClientField, value: &str) -> Result<(), FormError> {
        let slot = match field {
            ClientField::Name => &mut self.name,
            ClientField::Email => &mut self.email,
            ClientField::Phone => &mut self.phone,
        };
        *slot = value.to_string();
        Ok(())
    }

    fn is_blank(&self, field: ClientField) -> bool {
        match field {
            ClientField::Name => self.name.is_empty(),
            ClientField::Email => self.email.is_empty(),
            ClientField::Phone => self.phone.is_empty(),
        }
    }

    fn field_name(field: ClientField) -> &'static str {
        field.name()
    }
}

impl FormRecord for Credentials {
    type Field = CredentialsField;

    const REQUIRED: &'static [CredentialsField] =
        &[CredentialsField::Password, CredentialsField::Email];

    fn set_field(&mut self, field: CredentialsField, value: &str) -> Result<(), FormError> {
        match field {
            CredentialsField::Email => self.email = value.to_string(),
            CredentialsField::Password => self.password = value.to_string(),
        }
        Ok(())
    }

    fn is_blank(&self, field: CredentialsField) -> bool {
        match field {
            CredentialsField::Email => self.email.is_empty(),
            CredentialsField::Password => self.password.is_empty(),
        }
    }

    fn field_name(field: CredentialsField) -> &'static str {
        field.name()
    }
}

/// Blank means "nothing selected".
pub fn parse_client_id(value: &str) -> Result<ClientId, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(ClientId::default());
    }

    trimmed
        .parse::<i64>()
        .map(ClientId)
        .map_err(|_| FormError::InvalidNumber {
            field: ProjectField::ClientId.name(),
            value: value.to_string(),
        })
}

/// Accepts both `500.00` and the comma-decimal `1.500,00` form.
///
/// Without a comma the dot is the decimal point, as number inputs report it,
/// so `1.500` is one and a half. Negative amounts are rejected.
pub fn parse_amount(value: &str) -> Result<f64, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }

    let normalized = if trimmed.contains(',') {
        trimmed.replace('.', "").replace(',', ".")
    } else {
        trimmed.to_string()
    };

    normalized
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && amount.is_sign_positive())
        .ok_or_else(|| FormError::InvalidNumber {
            field: ProjectField::Value.name(),
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_project() -> ProjectRecord {
        ProjectRecord {
            title: "Landing page".into(),
            resume: "Site institucional".into(),
            important_infos: "Entregar em PT-BR".into(),
            start_date: "2024-03-01".into(),
            limit_date: "2024-04-01".into(),
            client_id: ClientId(4),
            value: 0.0,
        }
    }

    #[test]
    fn set_named_replaces_only_that_field() {
        let mut record = complete_project();
        record
            .set_named("importantInfos", "Sem reuniões às sextas")
            .expect("known field");
        assert_eq!(record.important_infos, "Sem reuniões às sextas");
        assert_eq!(record.title, "Landing page");
        assert_eq!(record.client_id, ClientId(4));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let mut record = ClientRecord::default();
        let err = record.set_named("address", "Rua A").expect_err("unknown");
        assert_eq!(err, FormError::UnknownField("address".into()));
        assert_eq!(record, ClientRecord::default());
    }

    #[test]
    fn invalid_number_leaves_record_untouched() {
        let mut record = complete_project();
        let err = record.set_named("clientId", "abc").expect_err("not a number");
        assert!(matches!(err, FormError::InvalidNumber { field: "clientId", .. }));
        assert_eq!(record.client_id, ClientId(4));

        record.set_named("value", "12x").expect_err("not a number");
        assert_eq!(record.value, 0.0);
    }

    #[test]
    fn amount_accepts_comma_decimals() {
        assert_eq!(parse_amount("500,00").expect("amount"), 500.0);
        assert_eq!(parse_amount("1.500,50").expect("amount"), 1500.5);
        assert_eq!(parse_amount("750.25").expect("amount"), 750.25);
        assert_eq!(parse_amount("").expect("amount"), 0.0);
        assert!(parse_amount("NaN").is_err());
    }

    #[test]
    fn dot_without_comma_is_a_decimal_point() {
        assert_eq!(parse_amount("1.500").expect("amount"), 1.5);
        assert_eq!(parse_amount("1.500,00").expect("amount"), 1500.0);
    }

    #[test]
    fn negative_amounts_are_rejected() {
        for raw in ["-500,00", "-1", "-0.5"] {
            assert_eq!(
                parse_amount(raw),
                Err(FormError::InvalidNumber {
                    field: "value",
                    value: raw.to_string(),
                })
            );
        }
        let mut record = ProjectRecord::default();
        record.set_named("value", "-500,00").expect_err("negative");
        assert_eq!(record.value, 0.0);
    }

    #[test]
    fn blank_client_id_means_unselected() {
        assert!(parse_client_id(" ").expect("blank").is_unset());
        assert_eq!(parse_client_id("12").expect("id"), ClientId(12));
    }

    #[test]
    fn every_missing_project_field_fails_validation() {
        for field in ProjectRecord::REQUIRED {
            let mut record = complete_project();
            let cleared = if *field == ProjectField::ClientId { "0" } else { "" };
            record.set_field(*field, cleared).expect("clear");
            assert_eq!(
                record.validate(),
                Err(ValidationError::MissingField(field.name()))
            );
        }
        assert_eq!(complete_project().validate(), Ok(()));
    }

    #[test]
    fn value_is_optional() {
        let mut record = complete_project();
        record.set_named("value", "").expect("blank value");
        assert_eq!(record.validate(), Ok(()));
    }

    #[test]
    fn credentials_need_both_fields() {
        let mut creds = Credentials::default();
        creds.set_named("email", "a@b.com").expect("email");
        assert_eq!(
            creds.validate(),
            Err(ValidationError::MissingField("password"))
        );
        creds.set_named("password", "x").expect("password");
        assert_eq!(creds.validate(), Ok(()));
    }
}
