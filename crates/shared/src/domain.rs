use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(UserId);
id_newtype!(ClientId);

impl ClientId {
    /// `0` is what an untouched client selection holds.
    pub fn is_unset(&self) -> bool {
        self.0 == 0
    }
}

/// Which registration form is visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TabSelection {
    #[default]
    #[serde(rename = "Projeto")]
    Project,
    #[serde(rename = "Cliente")]
    Client,
}

impl TabSelection {
    pub fn label(&self) -> &'static str {
        match self {
            TabSelection::Project => "Projeto",
            TabSelection::Client => "Cliente",
        }
    }
}
