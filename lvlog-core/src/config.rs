use std::{
    convert::Infallible,
    ops::Deref,
    str::FromStr,
    sync::{Arc, LazyLock},
};

use derive_from_env::FromEnv;

use crate::{
    formatter::{ColoredFormatter, Formatter, MetaFormatter, PlainFormatter},
    level::{Level, ParseLevelError},
};

/// Minimum level requested through `LVLOG_LEVEL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelSetting {
    /// `debug` in debug builds, `info` in release builds.
    #[default]
    Auto,
    Fixed(Level),
}

impl LevelSetting {
    pub fn resolve(self) -> Level {
        match self {
            LevelSetting::Auto => Level::build_default(),
            LevelSetting::Fixed(level) => level,
        }
    }
}

impl FromStr for LevelSetting {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("auto") {
            Ok(LevelSetting::Auto)
        } else {
            s.parse().map(LevelSetting::Fixed)
        }
    }
}

/// Built-in formatter requested through `LVLOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatterKind {
    #[default]
    Meta,
    Plain,
    Colored,
}

impl FormatterKind {
    pub fn build(self) -> Arc<dyn Formatter> {
        match self {
            FormatterKind::Meta => Arc::new(MetaFormatter),
            FormatterKind::Plain => Arc::new(PlainFormatter),
            FormatterKind::Colored => Arc::new(ColoredFormatter),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown formatter `{0}`, expected one of meta, plain, colored")]
pub struct ParseFormatterKindError(String);

impl FromStr for FormatterKind {
    type Err = ParseFormatterKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "meta" => Ok(FormatterKind::Meta),
            "plain" => Ok(FormatterKind::Plain),
            "colored" => Ok(FormatterKind::Colored),
            _ => Err(ParseFormatterKindError(s.to_string())),
        }
    }
}

/// Parses like `T`, but an unparsable value yields `T::default()`.
///
/// Each variable falls back on its own, so a typo in one does not discard
/// the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Lenient<T>(pub T);

impl<T: FromStr + Default> FromStr for Lenient<T> {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Lenient(s.parse().unwrap_or_default()))
    }
}

impl<T> Deref for Lenient<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

// Aliases so the `FromEnv` derive, which emits `<type>::from_str`, gets a
// path without generic arguments.
type LenientLevelSetting = Lenient<LevelSetting>;
type LenientFormatterKind = Lenient<FormatterKind>;

#[derive(FromEnv)]
#[from_env(prefix = "LVLOG")]
#[allow(non_snake_case)]
pub struct LvlogConfig {
    #[from_env(default = "auto")]
    pub LEVEL: LenientLevelSetting,
    #[from_env(default = "meta")]
    pub FORMAT: LenientFormatterKind,
}

impl Default for LvlogConfig {
    fn default() -> Self {
        Self {
            LEVEL: Lenient(LevelSetting::Auto),
            FORMAT: Lenient(FormatterKind::Meta),
        }
    }
}

/// Read once from the environment; each unparsable value falls back to its
/// default.
pub static LVLOG_CONFIG: LazyLock<LvlogConfig> =
    LazyLock::new(|| LvlogConfig::from_env().unwrap_or_default());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_setting() {
        assert_eq!("auto".parse(), Ok(LevelSetting::Auto));
        assert_eq!("Warn".parse(), Ok(LevelSetting::Fixed(Level::Warn)));
        assert!("loud".parse::<LevelSetting>().is_err());
        assert_eq!(LevelSetting::Fixed(Level::Trace).resolve(), Level::Trace);
        assert_eq!(LevelSetting::Auto.resolve(), Level::build_default());
    }

    #[test]
    fn test_formatter_kind() {
        assert_eq!("plain".parse(), Ok(FormatterKind::Plain));
        assert_eq!("COLORED".parse(), Ok(FormatterKind::Colored));
        assert!("json".parse::<FormatterKind>().is_err());
        assert_eq!(FormatterKind::default(), FormatterKind::Meta);
    }

    #[test]
    fn test_lenient_falls_back_to_default() {
        assert_eq!("plain".parse(), Ok(Lenient(FormatterKind::Plain)));
        assert_eq!("json".parse(), Ok(Lenient(FormatterKind::Meta)));
        assert_eq!("loud".parse(), Ok(Lenient(LevelSetting::Auto)));
        assert_eq!(Lenient(LevelSetting::Fixed(Level::Warn)).resolve(), Level::Warn);
    }

    #[test]
    fn test_invalid_variable_keeps_the_other() {
        // SAFETY: no other test of this crate reads the LVLOG_* variables.
        unsafe {
            std::env::set_var("LVLOG_LEVEL", "loud");
            std::env::set_var("LVLOG_FORMAT", "plain");
        }
        let config = LvlogConfig::from_env().unwrap();
        assert_eq!(*config.LEVEL, LevelSetting::Auto);
        assert_eq!(*config.FORMAT, FormatterKind::Plain);

        unsafe {
            std::env::set_var("LVLOG_LEVEL", "warn");
            std::env::set_var("LVLOG_FORMAT", "json");
        }
        let config = LvlogConfig::from_env().unwrap();
        assert_eq!(*config.LEVEL, LevelSetting::Fixed(Level::Warn));
        assert_eq!(*config.FORMAT, FormatterKind::Meta);

        unsafe {
            std::env::remove_var("LVLOG_LEVEL");
            std::env::remove_var("LVLOG_FORMAT");
        }
        let config = LvlogConfig::from_env().unwrap();
        assert_eq!(*config.LEVEL, LevelSetting::Auto);
        assert_eq!(*config.FORMAT, FormatterKind::Meta);
    }
}
