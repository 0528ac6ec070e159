// SPDX-License-Identifier: MPL-2.0
//! View rendering for the demo application.
//!
//! The control panel fills the window and the toast overlay is stacked on
//! top of it.

use super::Message;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::notifications::{Position, ToastHost, Variant};
use iced::widget::{button, pick_list, Column, Container, Row, Stack, Text};
use iced::{alignment, Element, Length};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub host: &'a ToastHost,
    pub position: Position,
}

/// Renders the control panel with the toast overlay above it.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let overlay = ctx.host.view().map(Message::Toasts);

    Stack::with_children(vec![view_controls(ctx.position, ctx.host.toasts().len()), overlay])
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn view_controls<'a>(position: Position, active: usize) -> Element<'a, Message> {
    let variant_buttons = Variant::ALL
        .into_iter()
        .filter(|variant| *variant != Variant::Loading)
        .fold(Row::new().spacing(spacing::XS), |row, variant| {
            row.push(control_button(label_for(variant), Message::Show(variant)))
        });

    let promise_buttons = Row::new()
        .spacing(spacing::XS)
        .push(control_button(
            "Upload (succeeds)",
            Message::Promise { succeed: true },
        ))
        .push(control_button(
            "Upload (fails)",
            Message::Promise { succeed: false },
        ))
        .push(control_button("Loading", Message::Show(Variant::Loading)));

    let position_row = Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .push(Text::new("Position"))
        .push(pick_list(
            Position::ALL,
            Some(position),
            Message::PositionSelected,
        ));

    let content = Column::new()
        .spacing(spacing::MD)
        .push(Text::new("Toasts").size(typography::TITLE_MD))
        .push(variant_buttons)
        .push(promise_buttons)
        .push(position_row)
        .push(
            Row::new()
                .spacing(spacing::SM)
                .align_y(alignment::Vertical::Center)
                .push(control_button("Dismiss all", Message::DismissAll))
                .push(Text::new(format!("{active} active"))),
        );

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(spacing::LG)
        .into()
}

fn control_button<'a>(label: &'a str, message: Message) -> Element<'a, Message> {
    button(Text::new(label))
        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
        .on_press(message)
        .into()
}

fn label_for(variant: Variant) -> &'static str {
    match variant {
        Variant::Success => "Success",
        Variant::Error => "Error",
        Variant::Warning => "Warning",
        Variant::Info => "Info",
        Variant::Loading => "Loading",
    }
}
