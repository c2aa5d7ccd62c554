use ratatui::style::Color;

use crate::payload::Category;

pub const BACKGROUND: Color = Color::Rgb(24, 23, 21); // #181715
pub const FOREGROUND: Color = Color::Rgb(168, 163, 159); // #A8A39F
pub const DIMMED: Color = Color::Rgb(85, 84, 69); // #555445
pub const RED: Color = Color::Rgb(152, 41, 15); // #98290F
pub const GREEN: Color = Color::Rgb(71, 154, 67); // #479A43
pub const YELLOW: Color = Color::Rgb(127, 113, 17); // #7F7111
pub const BLUE: Color = Color::Rgb(73, 127, 125); // #497F7D
pub const PURPLE: Color = Color::Rgb(127, 78, 47); // #7F4E2F
pub const CYAN: Color = Color::Rgb(56, 127, 88); // #387F58

pub const BRIGHT_YELLOW: Color = Color::Rgb(214, 153, 39); // #D69927
pub const BRIGHT_BLUE: Color = Color::Rgb(121, 217, 217); // #79D9D9
pub const BRIGHT_PURPLE: Color = Color::Rgb(205, 124, 84); // #CD7C54

pub const SELECTION_BG: Color = Color::Rgb(65, 56, 41); // #413829

// QR preview is drawn dark-on-light regardless of the UI palette
pub const QR_DARK: Color = Color::Black;
pub const QR_LIGHT: Color = Color::White;

pub fn category_color(category: Category) -> Color {
    match category {
        Category::Url => BRIGHT_BLUE,
        Category::Wifi => GREEN,
        Category::Email | Category::Sms => BRIGHT_YELLOW,
        Category::Phone => YELLOW,
        Category::Geo => CYAN,
        Category::VCard | Category::Event => BRIGHT_PURPLE,
        Category::Text => FOREGROUND,
    }
}
