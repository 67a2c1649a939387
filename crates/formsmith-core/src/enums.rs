//! Enum types for form definitions.
//!
//! String-backed enums share one shape:
//! - Custom Serialize (as the wire string)
//! - Custom Deserialize (known variants + catch-all `Custom(String)`)
//! - `as_str()`, `is_default()`, `is_builtin()`, `Display` impl
//!
//! Unknown strings are preserved rather than rejected so that a definition
//! written by a newer editor still loads, renders and re-exports.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Macro: defines an enum with known string variants + a Custom(String) fallback.
// ---------------------------------------------------------------------------
macro_rules! define_enum {
    (
        $(#[$meta:meta])*
        $name:ident, default = $default:ident, custom_variant = $custom_variant:ident,
        variants: [
            $( ($variant:ident, $str:expr) ),+ $(,)?
        ]
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $variant, )+
            $custom_variant(String),
        }

        impl $name {
            /// Every built-in variant, in declaration order.
            pub const BUILTIN: &'static [$name] = &[ $( Self::$variant, )+ ];

            /// Returns the string representation.
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $str, )+
                    Self::$custom_variant(s) => s.as_str(),
                }
            }

            /// Returns `true` if this is the default variant.
            pub fn is_default(&self) -> bool {
                *self == Self::$default
            }

            /// Returns `true` if this is a built-in (non-custom) variant.
            pub fn is_builtin(&self) -> bool {
                !matches!(self, Self::$custom_variant(_))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Ok(Self::from(s.as_str()))
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                match s {
                    $( $str => Self::$variant, )+
                    other => Self::$custom_variant(other.to_owned()),
                }
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                match s.as_str() {
                    $( $str => Self::$variant, )+
                    _ => Self::$custom_variant(s),
                }
            }
        }
    };
}

// ===========================================================================
// FieldType
// ===========================================================================

define_enum! {
    /// Kind of form control a field renders as.
    FieldType, default = Text, custom_variant = Custom,
    variants: [
        (Text, "text"),
        (Email, "email"),
        (Number, "number"),
        (Phone, "phone"),
        (Url, "url"),
        (Password, "password"),
        (Textarea, "textarea"),
        (Paragraph, "paragraph"),
        (Select, "select"),
        (Radio, "radio"),
        (Checkbox, "checkbox"),
        (Multiselect, "multiselect"),
        (Date, "date"),
        (Time, "time"),
        (Datetime, "datetime"),
        (File, "file"),
        (Rating, "rating"),
        (Range, "range"),
        (Color, "color"),
        (Country, "country"),
        (Scale, "scale"),
        (Signature, "signature"),
        (Captcha, "captcha"),
        (Hidden, "hidden"),
        (PageBreak, "pageBreak"),
    ]
}

impl FieldType {
    /// Returns `true` for the step-boundary marker.
    pub fn is_page_break(&self) -> bool {
        matches!(self, Self::PageBreak)
    }

    /// Returns `true` for types that must carry an options list.
    pub fn requires_options(&self) -> bool {
        matches!(self, Self::Select | Self::Radio | Self::Multiselect)
    }

    /// Returns `true` for types whose options list is meaningful.
    pub fn accepts_options(&self) -> bool {
        self.requires_options() || matches!(self, Self::Checkbox)
    }

    /// Returns `true` for types that accept `minLength`, `maxLength` and `pattern`.
    pub fn is_text_like(&self) -> bool {
        matches!(
            self,
            Self::Text
                | Self::Email
                | Self::Phone
                | Self::Url
                | Self::Password
                | Self::Textarea
                | Self::Paragraph
        )
    }

    /// Returns `true` for types that accept `min`, `max` and `step`.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Number | Self::Range | Self::Rating | Self::Scale)
    }

    /// Returns `true` if the control holds a user value at run time.
    pub fn carries_value(&self) -> bool {
        !self.is_page_break()
    }

    /// Label given to freshly added fields of this type.
    pub fn default_label(&self) -> String {
        match self {
            Self::Text => "Text Field".into(),
            Self::Email => "Email Address".into(),
            Self::Number => "Number".into(),
            Self::Phone => "Phone Number".into(),
            Self::Url => "Website".into(),
            Self::Password => "Password".into(),
            Self::Textarea | Self::Paragraph => "Message".into(),
            Self::Select => "Select an option".into(),
            Self::Radio => "Choose one".into(),
            Self::Checkbox => "Checkbox".into(),
            Self::Multiselect => "Select options".into(),
            Self::Date => "Date".into(),
            Self::Time => "Time".into(),
            Self::Datetime => "Date and Time".into(),
            Self::File => "Upload File".into(),
            Self::Rating => "Rating".into(),
            Self::Range => "Range".into(),
            Self::Color => "Color".into(),
            Self::Country => "Country".into(),
            Self::Scale => "Scale".into(),
            Self::Signature => "Signature".into(),
            Self::Captcha => "Verification".into(),
            Self::Hidden => "Hidden Field".into(),
            Self::PageBreak => String::new(),
            Self::Custom(s) => s.clone(),
        }
    }
}

// ===========================================================================
// Operator
// ===========================================================================

define_enum! {
    /// Comparison applied by a conditional-logic rule.
    Operator, default = Equals, custom_variant = Custom,
    variants: [
        (Equals, "equals"),
        (NotEquals, "notEquals"),
        (Contains, "contains"),
        (GreaterThan, "greaterThan"),
        (LessThan, "lessThan"),
        (IsEmpty, "isEmpty"),
        (IsNotEmpty, "isNotEmpty"),
        (StartsWith, "startsWith"),
        (EndsWith, "endsWith"),
        (Matches, "matches"),
        (In, "in"),
        (NotIn, "notIn"),
        (Checked, "checked"),
        (IsChecked, "isChecked"),
        (NotChecked, "notChecked"),
        (True, "true"),
        (IsTrue, "isTrue"),
        (False, "false"),
    ]
}

impl Operator {
    /// Returns `true` if the operator ignores the rule's comparison value
    /// unless one is explicitly given.
    pub fn value_optional(&self) -> bool {
        matches!(
            self,
            Self::IsEmpty
                | Self::IsNotEmpty
                | Self::Checked
                | Self::IsChecked
                | Self::NotChecked
                | Self::True
                | Self::IsTrue
                | Self::False
        )
    }
}

// ===========================================================================
// Combinator
// ===========================================================================

define_enum! {
    /// How a field's rules are combined.
    Combinator, default = And, custom_variant = Custom,
    variants: [
        (And, "AND"),
        (Or, "OR"),
    ]
}

// ===========================================================================
// LogicAction
// ===========================================================================

define_enum! {
    /// What a field's combined rule result does.
    ///
    /// Only `show` and `hide` affect visibility; the remaining actions are
    /// carried through exports untouched.
    LogicAction, default = Show, custom_variant = Custom,
    variants: [
        (Show, "show"),
        (Hide, "hide"),
        (Enable, "enable"),
        (Disable, "disable"),
        (Require, "require"),
        (Unrequire, "unrequire"),
    ]
}

// ===========================================================================
// ExportFormat
// ===========================================================================

/// Target format of a code generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
    #[default]
    Json,
    CssFramework,
    React,
    Typescript,
    Wordpress,
}

impl ExportFormat {
    /// Every export format, in menu order.
    pub const ALL: [ExportFormat; 5] = [
        Self::Json,
        Self::CssFramework,
        Self::React,
        Self::Typescript,
        Self::Wordpress,
    ];

    /// Returns the format identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::CssFramework => "css-framework",
            Self::React => "react",
            Self::Typescript => "typescript",
            Self::Wordpress => "wordpress",
        }
    }

    /// Media type of the generated artifact.
    pub fn media_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::CssFramework => "text/html",
            Self::React => "text/jsx",
            Self::Typescript => "text/tsx",
            Self::Wordpress => "text/plain",
        }
    }

    /// Conventional file extension for the generated artifact.
    pub fn file_extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::CssFramework => "html",
            Self::React => "jsx",
            Self::Typescript => "tsx",
            Self::Wordpress => "txt",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "css-framework" | "html" => Ok(Self::CssFramework),
            "react" | "jsx" => Ok(Self::React),
            "typescript" | "tsx" => Ok(Self::Typescript),
            "wordpress" | "shortcode" => Ok(Self::Wordpress),
            other => Err(format!("unknown export format: {}", other)),
        }
    }
}

// ===========================================================================
// CssFramework
// ===========================================================================

/// Class vocabulary used by the markup generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CssFramework {
    #[default]
    Bootstrap,
    Tailwind,
    Plain,
}

impl CssFramework {
    /// Returns the framework identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bootstrap => "bootstrap",
            Self::Tailwind => "tailwind",
            Self::Plain => "plain",
        }
    }
}

impl fmt::Display for CssFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CssFramework {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bootstrap" => Ok(Self::Bootstrap),
            "tailwind" => Ok(Self::Tailwind),
            "plain" | "none" => Ok(Self::Plain),
            other => Err(format!("unknown css framework: {}", other)),
        }
    }
}
