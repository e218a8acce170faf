//! Terminal rendering of the widget

use console::{style, Style};
use glass_calculator::input::{ButtonVariant, KeyboardMapper, Keypad, KeypadButtonDef};
use glass_calculator::widget::WidgetView;

/// Characters per keypad column, brackets and gap included
const CELL_WIDTH: usize = 8;

fn screen_width(keypad: &Keypad) -> usize {
    let (_, cols) = keypad.dimensions();
    CELL_WIDTH * cols - 1
}

fn button_style(button: &KeypadButtonDef, view: &WidgetView) -> Style {
    let id = Some(button.id.as_str());
    if view.pressed_button.as_deref() == id {
        return Style::new().reverse().bold();
    }
    if view.active_operator.as_deref() == id {
        return Style::new().black().on_yellow().bold();
    }
    match button.variant {
        ButtonVariant::Number => Style::new(),
        ButtonVariant::Function => Style::new().cyan(),
        ButtonVariant::Operator => Style::new().yellow(),
    }
}

fn render_button(button: &KeypadButtonDef, view: &WidgetView) -> String {
    let label = if button.id == "btn-clear" {
        view.clear_label.as_str()
    } else {
        button.label.as_str()
    };
    let inner = CELL_WIDTH * button.col_span - 3;
    let cell = format!("[{label:^inner$}]");
    button_style(button, view).apply_to(cell).to_string()
}

/// Renders the keypad grid, one string per row
#[must_use]
pub fn render_keypad(keypad: &Keypad, view: &WidgetView) -> Vec<String> {
    let (rows, _) = keypad.dimensions();
    (0..rows)
        .map(|row| {
            let mut buttons: Vec<&KeypadButtonDef> =
                keypad.buttons().iter().filter(|b| b.row == row).collect();
            buttons.sort_by_key(|b| b.col);
            buttons
                .into_iter()
                .map(|b| render_button(b, view))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Renders the whole screen: theme, expression, display, keypad and history
#[must_use]
pub fn render_screen(view: &WidgetView, keypad: &Keypad) -> Vec<String> {
    let width = screen_width(keypad);
    let mut lines = Vec::new();

    lines.push(style(format!("theme: {}", view.theme)).dim().to_string());
    lines.push(style(format!("{:>width$}", view.expression)).dim().to_string());

    let display = format!("{:>width$}", view.display);
    let display = if view.pulsing {
        style(display).bold().bright().green()
    } else {
        style(display).bold()
    };
    lines.push(display.to_string());
    lines.push(String::new());

    lines.extend(render_keypad(keypad, view));
    lines.push(String::new());

    lines.push(style("History").underlined().to_string());
    if let Some(placeholder) = &view.history_placeholder {
        lines.push(style(format!("  {placeholder}")).dim().to_string());
    }
    for (index, item) in view.history.iter().enumerate() {
        lines.push(format!(
            "  {} {}  {}",
            style(format!("{index:>2}.")).dim(),
            style(&item.expression).dim(),
            item.result_line
        ));
    }
    lines
}

/// Renders the keyboard mapping table
#[must_use]
pub fn render_keys() -> Vec<String> {
    let mut lines = vec![style("Key               Action").bold().to_string()];
    lines.extend(
        KeyboardMapper::key_table()
            .iter()
            .map(|(keys, action)| format!("{keys:<18}{action}")),
    );
    lines
}
