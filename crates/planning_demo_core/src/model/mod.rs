//! Typed records for the fourteen planning tables.
//!
//! # Responsibility
//! - Define one record per table row, as handed from generator to writer.
//! - Define the closed string vocabularies (roles, statuses, priorities, ...)
//!   stored in text columns.
//!
//! # Invariants
//! - Every vocabulary value round-trips through its `as_str()` spelling,
//!   which is also its serde spelling and its stored SQL text.

/// Integer primary key shared by all generated tables.
pub type RowId = i64;

/// Declares a closed vocabulary stored as snake_case text.
macro_rules! planning_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $text)] $variant,)+
        }

        impl $name {
            /// Every value, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Stored text spelling.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }

            /// Parses the stored text spelling.
            pub fn parse(value: &str) -> Option<Self> {
                match value {
                    $($text => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl rusqlite::types::ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<rusqlite::types::ToSqlOutput<'_>> {
                Ok(rusqlite::types::ToSqlOutput::from(self.as_str()))
            }
        }
    };
}

pub mod activity;
pub mod org;
pub mod project;
pub mod task;

#[cfg(test)]
mod tests {
    use super::org::UserRole;
    use super::task::TaskStatus;

    #[test]
    fn vocabulary_round_trips_through_text() {
        for status in TaskStatus::ALL {
            assert_eq!(TaskStatus::parse(status.as_str()), Some(*status));
        }
        assert_eq!(UserRole::parse("vp"), Some(UserRole::Vp));
        assert_eq!(UserRole::parse("VP"), None);
    }

    #[test]
    fn vocabulary_serde_matches_stored_text() {
        let json = serde_json::to_string(&TaskStatus::InReview).unwrap();
        assert_eq!(json, "\"in_review\"");
    }
}
