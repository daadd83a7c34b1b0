//! Компонент ячейки таблицы для денежных значений

use super::number_format::{format_money, format_money_signed};
use leptos::prelude::*;
use thaw::*;

/// Ячейка с суммой в формате `$ 1.234,56`, выровненная вправо.
/// С `color_by_sign` положительные значения зелёные, отрицательные красные
/// (и выводятся со знаком).
#[component]
pub fn TableCellMoney(
    /// Значение для отображения
    #[prop(into)]
    value: Signal<Option<f64>>,

    /// Включить цветовую индикацию по знаку
    #[prop(optional, default = false)]
    color_by_sign: bool,

    /// Жирный шрифт
    #[prop(optional, default = false)]
    bold: bool,
) -> impl IntoView {
    let formatted_text = move || match value.get() {
        Some(v) if color_by_sign => format_money_signed(v),
        Some(v) => format_money(v),
        None => "—".to_string(),
    };

    let cell_class = move || {
        let mut classes = vec!["money"];
        if color_by_sign {
            match value.get() {
                Some(v) if v > 0.0 => classes.push("money--positive"),
                Some(v) if v < 0.0 => classes.push("money--negative"),
                _ => {}
            }
        }
        if bold {
            classes.push("money--bold");
        }
        classes.join(" ")
    };

    view! {
        <TableCell class="text-right">
            <span class=cell_class>{formatted_text}</span>
        </TableCell>
    }
}
