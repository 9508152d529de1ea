use serde::{Deserialize, Serialize};

use crate::domain::{ClientId, UserId};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub title: String,
    pub resume: String,
    pub important_infos: String,
    pub start_date: String,
    pub limit_date: String,
    pub client_id: ClientId,
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Session returned by sign-in.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub id: UserId,
}

impl AuthSession {
    pub fn has_token(&self) -> bool {
        !self.token.is_empty()
    }
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("token", &"<redacted>")
            .field("id", &self.id)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSummary {
    pub id: ClientId,
    pub name: String,
}

/// One row of the freelancer's client list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientListEntry {
    pub id: i64,
    pub client: ClientSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_record_uses_camel_case_on_the_wire() {
        let record = ProjectRecord {
            title: "Site".into(),
            important_infos: "prazo curto".into(),
            start_date: "2024-01-10".into(),
            limit_date: "2024-02-10".into(),
            client_id: ClientId(3),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(json["importantInfos"], "prazo curto");
        assert_eq!(json["startDate"], "2024-01-10");
        assert_eq!(json["limitDate"], "2024-02-10");
        assert_eq!(json["clientId"], 3);
        assert_eq!(json["value"], 0.0);
    }

    #[test]
    fn client_list_entry_reads_nested_client() {
        let entries: Vec<ClientListEntry> =
            serde_json::from_str(r#"[{"id":7,"client":{"id":2,"name":"ACME"}}]"#)
                .expect("deserialize");
        assert_eq!(entries[0].client.id, ClientId(2));
        assert_eq!(entries[0].client.name, "ACME");
    }

    #[test]
    fn debug_output_hides_secrets() {
        let session = AuthSession {
            token: "secret-token".into(),
            id: UserId(1),
        };
        let creds = Credentials {
            email: "a@b.com".into(),
            password: "hunter2".into(),
        };
        assert!(!format!("{session:?}").contains("secret-token"));
        assert!(!format!("{creds:?}").contains("hunter2"));
    }
}
