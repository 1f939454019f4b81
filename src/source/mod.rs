use std::fmt::{self, Display};

use icu_properties::props::GeneralCategory;

use crate::{charset::CodePointSet, error::Error};

mod compiled;
mod ucd;

pub use compiled::CompiledData;
pub use ucd::UcdDirectory;

/// A named collection of code points published by the Unicode standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property<'a> {
    GeneralCategory(&'a str),
    Block(&'a str),
}

impl Display for Property<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Property::GeneralCategory(name) => write!(f, "General_Category={name}"),
            Property::Block(name) => write!(f, "Block={name}"),
        }
    }
}

pub trait CategorySource {
    fn load(&self, property: Property) -> Result<CodePointSet, Error>;
}

#[derive(Debug, Clone, Copy)]
pub struct GeneralCategoryName {
    pub long: &'static str,
    pub short: &'static str,
    pub value: GeneralCategory,
}

const fn gc(long: &'static str, short: &'static str, value: GeneralCategory) -> GeneralCategoryName {
    GeneralCategoryName { long, short, value }
}

#[rustfmt::skip]
pub const GENERAL_CATEGORIES: &[GeneralCategoryName] = &[
    gc("Uppercase_Letter", "Lu", GeneralCategory::UppercaseLetter),
    gc("Lowercase_Letter", "Ll", GeneralCategory::LowercaseLetter),
    gc("Titlecase_Letter", "Lt", GeneralCategory::TitlecaseLetter),
    gc("Modifier_Letter", "Lm", GeneralCategory::ModifierLetter),
    gc("Other_Letter", "Lo", GeneralCategory::OtherLetter),
    gc("Nonspacing_Mark", "Mn", GeneralCategory::NonspacingMark),
    gc("Spacing_Mark", "Mc", GeneralCategory::SpacingMark),
    gc("Enclosing_Mark", "Me", GeneralCategory::EnclosingMark),
    gc("Decimal_Number", "Nd", GeneralCategory::DecimalNumber),
    gc("Letter_Number", "Nl", GeneralCategory::LetterNumber),
    gc("Other_Number", "No", GeneralCategory::OtherNumber),
    gc("Connector_Punctuation", "Pc", GeneralCategory::ConnectorPunctuation),
    gc("Dash_Punctuation", "Pd", GeneralCategory::DashPunctuation),
    gc("Open_Punctuation", "Ps", GeneralCategory::OpenPunctuation),
    gc("Close_Punctuation", "Pe", GeneralCategory::ClosePunctuation),
    gc("Initial_Punctuation", "Pi", GeneralCategory::InitialPunctuation),
    gc("Final_Punctuation", "Pf", GeneralCategory::FinalPunctuation),
    gc("Other_Punctuation", "Po", GeneralCategory::OtherPunctuation),
    gc("Math_Symbol", "Sm", GeneralCategory::MathSymbol),
    gc("Currency_Symbol", "Sc", GeneralCategory::CurrencySymbol),
    gc("Modifier_Symbol", "Sk", GeneralCategory::ModifierSymbol),
    gc("Other_Symbol", "So", GeneralCategory::OtherSymbol),
    gc("Space_Separator", "Zs", GeneralCategory::SpaceSeparator),
    gc("Line_Separator", "Zl", GeneralCategory::LineSeparator),
    gc("Paragraph_Separator", "Zp", GeneralCategory::ParagraphSeparator),
    gc("Control", "Cc", GeneralCategory::Control),
    gc("Format", "Cf", GeneralCategory::Format),
    gc("Surrogate", "Cs", GeneralCategory::Surrogate),
    gc("Private_Use", "Co", GeneralCategory::PrivateUse),
    gc("Unassigned", "Cn", GeneralCategory::Unassigned),
];

/// Look up a general category by its long name or its short alias.
pub fn general_category(name: &str) -> Option<&'static GeneralCategoryName> {
    GENERAL_CATEGORIES
        .iter()
        .find(|category| category.long == name || category.short == name)
}

/// Compares property value names the way UAX #44 loose matching does:
/// case, whitespace, underscores and hyphens are ignored.
pub fn loose_eq(a: &str, b: &str) -> bool {
    fn significant(str: &str) -> impl Iterator<Item = char> + '_ {
        str.chars()
            .filter(|&ch| !(ch.is_whitespace() || ch == '_' || ch == '-'))
            .map(|ch| ch.to_ascii_lowercase())
    }

    significant(a).eq(significant(b))
}
