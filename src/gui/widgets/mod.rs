use iced::{
    Color, Element, Length, Theme, border,
    widget::{
        Column, button, column, container,
        container::{Style, bordered_box},
        row, text,
    },
};

use crate::data::PageKind;

/// Sidebar entry background: the active page is shaded darker.
fn nav_style(active: bool) -> impl Fn(&Theme) -> Style {
    move |theme: &Theme| {
        let style = bordered_box(theme).border(border::width(if active { 2.0 } else { 0.0 }));
        if active {
            let mut color_rgba = theme.palette().background.into_rgba8();
            color_rgba[0] /= 2;
            color_rgba[1] /= 2;
            color_rgba[2] /= 2;
            style.background(Color::from_rgb8(color_rgba[0], color_rgba[1], color_rgba[2]))
        } else {
            style.background(theme.palette().background)
        }
    }
}

/// Sidebar with one entry per page next to the page's own content.
pub fn layout<'a, Message>(
    active: PageKind,
    navigate: impl Fn(PageKind) -> Message,
    main_content: impl Into<Element<'a, Message>>,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    let entries = Column::with_children(PageKind::ALL.iter().map(
        |&kind| -> Element<'a, Message> {
            container(
                button(text(kind.title()))
                    .width(Length::Fill)
                    .on_press(navigate(kind)),
            )
            .style(nav_style(kind == active))
            .padding(4)
            .into()
        },
    ))
    .spacing(4);

    container(row![
        container(column![text("dashkit").size(24), entries].spacing(20))
            .padding(10)
            .width(Length::FillPortion(1)),
        container(main_content.into()).width(Length::FillPortion(5)),
    ])
    .center_x(Length::Fill)
    .center_y(Length::Fill)
    .into()
}
