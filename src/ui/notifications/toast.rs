// SPDX-License-Identifier: MPL-2.0
//! Toast widget for rendering individual notifications.
//!
//! Toasts are the visual representation of notifications, appearing as
//! small cards with variant-colored accents and optional dismiss buttons.
//! Exiting toasts are drawn faded while their grace period runs out.

use super::host::Message;
use super::notification::Toast;
use crate::ui::design_tokens::{border, opacity, palette, radius, shadow, sizing, spacing, typography};
use crate::ui::theming::ColorScheme;
use iced::widget::{button, container, Column, Container, Row, Text};
use iced::{alignment, Color, Element, Length, Theme};

/// Close button glyph.
const CLOSE_GLYPH: &str = "\u{2715}";

/// Renders a single toast.
///
/// The close button is only shown for dismissible toasts and emits
/// [`Message::Dismiss`]. Removal after the exit grace period is scheduled by
/// the [`ToastHost`](super::ToastHost).
pub fn view<'a>(toast: &'a Toast, scheme: &ColorScheme) -> Element<'a, Message> {
    let colors = ItemColors::resolve(toast, scheme);

    let icon = Text::new(toast.icon().unwrap_or(toast.variant().glyph()))
        .size(sizing::ICON_SM)
        .color(colors.accent);

    let mut text_column = Column::new().spacing(spacing::XXS).push(
        Text::new(toast.title())
            .size(typography::BODY)
            .color(colors.text),
    );
    if let Some(description) = toast.description() {
        text_column = text_column.push(
            Text::new(description)
                .size(typography::CAPTION)
                .color(colors.secondary),
        );
    }

    // Layout: [icon] [title / description] [dismiss]
    let mut content = Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .push(Container::new(icon).padding(spacing::XXS))
        .push(
            Container::new(text_column)
                .width(Length::Fill)
                .align_x(alignment::Horizontal::Left),
        );

    if toast.is_dismissible() {
        let dismiss_button = button(
            Text::new(CLOSE_GLYPH)
                .size(typography::CAPTION)
                .color(colors.text),
        )
        .on_press(Message::Dismiss(toast.id()))
        .padding(spacing::XXS)
        .style(dismiss_button_style);
        content = content.push(dismiss_button);
    }

    let width = toast
        .style()
        .and_then(|style| style.width)
        .unwrap_or(sizing::TOAST_WIDTH);

    Container::new(content)
        .width(Length::Fixed(width))
        .padding(spacing::SM)
        .style(move |_theme: &Theme| toast_container_style(colors))
        .into()
}

/// Colours for one toast after style overrides and exit fading.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ItemColors {
    accent: Color,
    background: Color,
    text: Color,
    secondary: Color,
}

impl ItemColors {
    fn resolve(toast: &Toast, scheme: &ColorScheme) -> Self {
        let style = toast.style().copied().unwrap_or_default();
        let colors = Self {
            accent: style
                .accent
                .unwrap_or_else(|| scheme.accent(toast.variant())),
            background: style.background.unwrap_or(scheme.surface),
            text: style.text.unwrap_or(scheme.text_primary),
            secondary: style.text.unwrap_or(scheme.text_secondary),
        };

        if toast.is_exiting() {
            colors.faded(opacity::OVERLAY_MEDIUM)
        } else {
            colors
        }
    }

    fn faded(self, factor: f32) -> Self {
        let fade = |color: Color| Color {
            a: color.a * factor,
            ..color
        };
        Self {
            accent: fade(self.accent),
            background: fade(self.background),
            text: fade(self.text),
            secondary: fade(self.secondary),
        }
    }
}

/// Style function for the toast container.
fn toast_container_style(colors: ItemColors) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(colors.background)),
        border: iced::Border {
            color: colors.accent,
            width: border::WIDTH_MD,
            radius: radius::MD.into(),
        },
        shadow: shadow::MD,
        text_color: Some(colors.text),
        ..Default::default()
    }
}

/// Style function for the dismiss button.
fn dismiss_button_style(theme: &Theme, status: button::Status) -> button::Style {
    let base = theme.extended_palette().background.base;
    let hover_background = |alpha: f32| {
        Some(iced::Background::Color(Color {
            a: alpha,
            ..palette::GRAY_400
        }))
    };

    match status {
        button::Status::Active => button::Style {
            background: None,
            text_color: base.text,
            border: iced::Border::default(),
            shadow: shadow::NONE,
            snap: true,
        },
        button::Status::Hovered | button::Status::Pressed => button::Style {
            background: hover_background(if status == button::Status::Hovered {
                opacity::OVERLAY_SUBTLE
            } else {
                opacity::OVERLAY_MEDIUM
            }),
            text_color: base.text,
            border: iced::Border {
                radius: radius::SM.into(),
                ..Default::default()
            },
            shadow: shadow::NONE,
            snap: true,
        },
        button::Status::Disabled => button::Style {
            background: None,
            text_color: Color {
                a: opacity::OVERLAY_MEDIUM,
                ..base.text
            },
            border: iced::Border::default(),
            shadow: shadow::NONE,
            snap: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::notifications::notification::{Position, ToastId, ToastStyle, Variant};
    use std::time::Duration;

    fn toast(variant: Variant) -> Toast {
        Toast::new(
            ToastId::from_raw(1),
            "Saved".into(),
            variant,
            Position::TopRight,
            Duration::from_secs(3),
        )
    }

    #[test]
    fn toast_container_style_uses_accent_color() {
        let colors = ItemColors::resolve(&toast(Variant::Success), &ColorScheme::dark());
        let style = toast_container_style(colors);

        assert_eq!(style.border.color, palette::SUCCESS_500);
        assert!(style.background.is_some());
    }

    #[test]
    fn style_override_replaces_variant_accent() {
        let mut item = toast(Variant::Error);
        item.apply_extras(crate::ui::notifications::notification::Extras {
            description: None,
            dismissible: true,
            icon: None,
            class_name: None,
            style: Some(ToastStyle {
                accent: Some(palette::PRIMARY_700),
                ..ToastStyle::default()
            }),
        });

        let colors = ItemColors::resolve(&item, &ColorScheme::light());
        assert_eq!(colors.accent, palette::PRIMARY_700);
    }

    #[test]
    fn exiting_toasts_are_faded() {
        let scheme = ColorScheme::light();
        let mut item = toast(Variant::Info);
        let opaque = ItemColors::resolve(&item, &scheme);

        item.mark_exiting();
        let faded = ItemColors::resolve(&item, &scheme);

        assert!(faded.background.a < opaque.background.a);
        assert!(faded.text.a < opaque.text.a);
    }

    #[test]
    fn dismiss_button_styles_are_defined() {
        let theme = Theme::Dark;
        for status in [
            button::Status::Active,
            button::Status::Hovered,
            button::Status::Pressed,
            button::Status::Disabled,
        ] {
            let _ = dismiss_button_style(&theme, status);
        }
    }

    #[test]
    fn view_builds_for_every_variant() {
        let scheme = ColorScheme::dark();
        for variant in Variant::ALL {
            let item = toast(variant);
            let _ = view(&item, &scheme);
        }
    }
}
