//! Output style roles for timetable tables, error lines and clap help.
//!
//! Each role is a variant of `StyleRole` mapped to an optional `colored::Color`.
//! Coloring only happens when the caller passes `enabled`, so there is no
//! global color state.
//!
//! ```
//! use timetable::core::styles::StyleRole;
//! let plain = StyleRole::Header.paint("Workplace", false);
//! assert_eq!(plain, "Workplace");
//! let colored = StyleRole::Header.paint("Workplace", true);
//! assert!(colored.starts_with("\x1b["));
//! assert!(colored.ends_with("\x1b[0m"));
//! ```

use clap::builder::styling::AnsiColor;
use colored::Color;

macro_rules! style {
    ( $( $variant:ident => $color:expr ),+ $(,)? ) => {
        #[derive(Copy, Clone, Debug, PartialEq, Eq)]
        pub enum StyleRole { $( $variant ),+ }

        impl StyleRole {
            pub fn color(self) -> Option<Color> {
                match self { $( StyleRole::$variant => $color ),+ }
            }
        }
    }
}

style! {
    Header   => Some(Color::Yellow),
    Error    => Some(Color::BrightRed),
    Slot     => Some(Color::BrightGreen),
    Person   => Some(Color::Blue),
    Warning  => Some(Color::BrightYellow),
    Disabled => Some(Color::BrightBlack),
    Value    => None,
}

impl StyleRole {
    /// SGR parameter for the role's foreground color
    pub fn ansi_code(self) -> Option<String> {
        match self.color()? {
            Color::TrueColor { r, g, b } => Some(format!("38;2;{};{};{}", r, g, b)),
            color => basic_color(color).map(|(code, _, _)| code.to_string()),
        }
    }

    pub fn paint(self, text: &str, enabled: bool) -> String {
        match self.ansi_code() {
            Some(code) if enabled => format!("\x1b[{}m{}\x1b[0m", code, text),
            _ => text.to_string(),
        }
    }

    /// prettytable `style_spec` for the role, e.g. `FY`
    pub fn to_prettytable_spec(self) -> Option<String> {
        let (_, spec, _) = basic_color(self.color()?)?;
        Some(format!("F{}", spec))
    }

    fn clap_color(self) -> Option<AnsiColor> {
        basic_color(self.color()?).map(|(_, _, ansi)| ansi)
    }
}

/// SGR code, prettytable letter and clap color of the sixteen basic colors
fn basic_color(color: Color) -> Option<(u8, char, AnsiColor)> {
    use AnsiColor as A;
    Some(match color {
        Color::Black => (30, 'k', A::Black),
        Color::Red => (31, 'r', A::Red),
        Color::Green => (32, 'g', A::Green),
        Color::Yellow => (33, 'y', A::Yellow),
        Color::Blue => (34, 'b', A::Blue),
        Color::Magenta => (35, 'm', A::Magenta),
        Color::Cyan => (36, 'c', A::Cyan),
        Color::White => (37, 'w', A::White),
        Color::BrightBlack => (90, 'K', A::BrightBlack),
        Color::BrightRed => (91, 'R', A::BrightRed),
        Color::BrightGreen => (92, 'G', A::BrightGreen),
        Color::BrightYellow => (93, 'Y', A::BrightYellow),
        Color::BrightBlue => (94, 'B', A::BrightBlue),
        Color::BrightMagenta => (95, 'M', A::BrightMagenta),
        Color::BrightCyan => (96, 'C', A::BrightCyan),
        Color::BrightWhite => (97, 'W', A::BrightWhite),
        Color::TrueColor { .. } => return None,
    })
}

/// clap help styles drawn from the same roles as table output
///
/// Commands and flags read like slot names, value placeholders like person
/// ids.
pub fn palette_to_clap(enabled: bool) -> clap::builder::Styles {
    use clap::builder::styling::{Color as ClapColor, Style};
    if !enabled {
        return clap::builder::Styles::plain();
    }

    let style = |role: StyleRole| {
        Style::new().fg_color(role.clap_color().map(ClapColor::Ansi))
    };

    clap::builder::Styles::styled()
        .header(style(StyleRole::Header).bold())
        .usage(style(StyleRole::Header).bold())
        .literal(style(StyleRole::Slot))
        .placeholder(style(StyleRole::Person))
        .valid(style(StyleRole::Slot))
        .invalid(style(StyleRole::Warning))
        .error(style(StyleRole::Error).bold())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ansi_codes() {
        assert_eq!(StyleRole::Header.ansi_code().as_deref(), Some("33"));
        assert_eq!(StyleRole::Disabled.ansi_code().as_deref(), Some("90"));
        assert_eq!(StyleRole::Value.ansi_code(), None);
    }

    #[test]
    fn test_paint_respects_enabled() {
        let colored = StyleRole::Disabled.paint("V1", true);
        assert!(colored.starts_with("\x1b[90m") && colored.ends_with("\x1b[0m"));
        assert_eq!(StyleRole::Disabled.paint("V1", false), "V1");
        assert_eq!(StyleRole::Value.paint("V1", true), "V1");
    }

    #[test]
    fn test_prettytable_specs() {
        assert_eq!(StyleRole::Slot.to_prettytable_spec().as_deref(), Some("FG"));
        assert_eq!(StyleRole::Warning.to_prettytable_spec().as_deref(), Some("FY"));
        assert_eq!(StyleRole::Value.to_prettytable_spec(), None);
    }

    #[test]
    fn test_truecolor_has_no_basic_mapping() {
        assert!(basic_color(Color::TrueColor { r: 1, g: 2, b: 3 }).is_none());
    }

    #[test]
    fn test_palette_to_clap_differs_when_enabled() {
        let plain = format!("{:?}", palette_to_clap(false));
        let styled = format!("{:?}", palette_to_clap(true));
        assert_ne!(plain, styled);
    }
}
