//! The category registry: static display metadata for expense categories, income sources and
//! event categories.
//!
//! Each taxonomy is a closed enum with a designated `Other` variant. Looking up a code that is not
//! in the table yields `Other` instead of an error, so stale or hand-edited codes in stored data
//! still render.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Display metadata for one category code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInfo {
    /// The code stored on records, e.g. `food`.
    pub code: &'static str,
    /// The user-facing label.
    pub label: &'static str,
    /// Name of the icon in the icon set.
    pub icon: &'static str,
    /// Foreground color class.
    pub color: &'static str,
    /// Background color class, only event categories have one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<&'static str>,
}

/// Which registry to consult.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    #[default]
    Expense,
    Income,
    Event,
}

serde_plain::derive_display_from_serialize!(CategoryKind);
serde_plain::derive_fromstr_from_deserialize!(CategoryKind);

/// Behavior shared by the three category enums.
pub trait Taxonomy: Sized + Copy + 'static {
    /// Every variant, in registry order.
    const ALL: &'static [Self];
    /// The variant used when a code is unknown.
    const FALLBACK: Self;

    fn code(self) -> &'static str;

    fn info(self) -> &'static CategoryInfo;

    /// Strict parse: `None` for codes that are not in the table.
    fn parse_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.code() == code)
    }

    /// Lenient parse: unknown codes map to `FALLBACK`.
    fn from_code(code: &str) -> Self {
        Self::parse_code(code).unwrap_or(Self::FALLBACK)
    }

    fn options() -> Vec<&'static CategoryInfo> {
        Self::ALL.iter().map(|c| c.info()).collect()
    }
}

/// Returns the display metadata for `code` in the `kind` registry. Never fails: unknown codes,
/// including the empty string, return the registry's `other` entry.
pub fn lookup(code: &str, kind: CategoryKind) -> &'static CategoryInfo {
    match kind {
        CategoryKind::Expense => ExpenseCategory::from_code(code).info(),
        CategoryKind::Income => IncomeSource::from_code(code).info(),
        CategoryKind::Event => EventCategory::from_code(code).info(),
    }
}

macro_rules! taxonomy {
    (
        $(#[$meta:meta])*
        $name:ident, $noun:literal, $table:ident {
            $($variant:ident => $code:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub enum $name {
            $($variant,)+
            #[default]
            Other,
        }

        impl Taxonomy for $name {
            const ALL: &'static [Self] = &[$($name::$variant,)+ $name::Other];
            const FALLBACK: Self = $name::Other;

            fn code(self) -> &'static str {
                match self {
                    $($name::$variant => $code,)+
                    $name::Other => "other",
                }
            }

            fn info(self) -> &'static CategoryInfo {
                &$table[self as usize]
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.code())
            }
        }

        impl FromStr for $name {
            type Err = String;

            /// Strict: used for user input, where an unknown code is a mistake.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse_code(s).ok_or_else(|| {
                    let codes: Vec<&str> = Self::ALL.iter().map(|c| c.code()).collect();
                    format!("Unknown {} '{s}', expected one of: {}", $noun, codes.join(", "))
                })
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(self.code())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            /// Lenient: stored data with a code we no longer know becomes `Other`.
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                Ok(Self::from_code(&s))
            }
        }

        impl JsonSchema for $name {
            fn schema_name() -> Cow<'static, str> {
                stringify!($name).into()
            }

            fn json_schema(_generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
                let codes: Vec<&str> = Self::ALL.iter().map(|c| c.code()).collect();
                schemars::json_schema!({
                    "type": "string",
                    "enum": codes
                })
            }
        }
    };
}

taxonomy!(
    /// What money was spent on.
    ExpenseCategory, "expense category", EXPENSE_CATEGORIES {
        Food => "food",
        Transport => "transport",
        Housing => "housing",
        Entertainment => "entertainment",
        Health => "health",
        Education => "education",
        Shopping => "shopping",
    }
);

taxonomy!(
    /// Where money came from.
    IncomeSource, "income source", INCOME_SOURCES {
        Salary => "salary",
        Freelance => "freelance",
        Allowance => "allowance",
        Investment => "investment",
    }
);

taxonomy!(
    /// What kind of calendar event this is.
    EventCategory, "event category", EVENT_CATEGORIES {
        Uni => "uni",
        Work => "work",
        Personal => "personal",
        Health => "health",
        Social => "social",
    }
);

const fn info(
    code: &'static str,
    label: &'static str,
    icon: &'static str,
    color: &'static str,
) -> CategoryInfo {
    CategoryInfo {
        code,
        label,
        icon,
        color,
        background: None,
    }
}

const fn event_info(
    code: &'static str,
    label: &'static str,
    icon: &'static str,
    color: &'static str,
    background: &'static str,
) -> CategoryInfo {
    CategoryInfo {
        code,
        label,
        icon,
        color,
        background: Some(background),
    }
}

// The tables are indexed by variant discriminant, keep them in declaration order.

static EXPENSE_CATEGORIES: [CategoryInfo; 8] = [
    info("food", "Essen & Trinken", "shopping-cart", "text-orange-500"),
    info("transport", "Transport", "car", "text-blue-500"),
    info("housing", "Wohnen", "home", "text-green-500"),
    info("entertainment", "Unterhaltung", "film", "text-purple-500"),
    info("health", "Gesundheit", "heart", "text-red-500"),
    info("education", "Bildung", "graduation-cap", "text-indigo-500"),
    info("shopping", "Shopping", "shopping-bag", "text-pink-500"),
    info("other", "Sonstiges", "more-horizontal", "text-gray-500"),
];

static INCOME_SOURCES: [CategoryInfo; 5] = [
    info("salary", "Gehalt", "wallet", "text-emerald-500"),
    info("freelance", "Freelance", "briefcase", "text-cyan-500"),
    info("allowance", "Taschengeld", "gift", "text-yellow-500"),
    info("investment", "Investition", "trending-up", "text-green-600"),
    info("other", "Sonstiges", "more-horizontal", "text-gray-500"),
];

static EVENT_CATEGORIES: [CategoryInfo; 6] = [
    event_info(
        "uni",
        "Uni",
        "graduation-cap",
        "text-blue-600 dark:text-blue-400",
        "bg-blue-100 dark:bg-blue-900/30",
    ),
    event_info(
        "work",
        "Arbeit",
        "briefcase",
        "text-purple-600 dark:text-purple-400",
        "bg-purple-100 dark:bg-purple-900/30",
    ),
    event_info(
        "personal",
        "Privat",
        "user",
        "text-green-600 dark:text-green-400",
        "bg-green-100 dark:bg-green-900/30",
    ),
    event_info(
        "health",
        "Gesundheit",
        "heart",
        "text-red-600 dark:text-red-400",
        "bg-red-100 dark:bg-red-900/30",
    ),
    event_info(
        "social",
        "Sozial",
        "users",
        "text-yellow-600 dark:text-yellow-400",
        "bg-yellow-100 dark:bg-yellow-900/30",
    ),
    event_info(
        "other",
        "Sonstiges",
        "more-horizontal",
        "text-gray-600 dark:text-gray-400",
        "bg-gray-100 dark:bg-gray-900/30",
    ),
];
