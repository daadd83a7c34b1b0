pub mod details;
pub mod list;

use crate::shared::components::table::format_money_signed;
use contracts::domain::a005_cash_closing::ClosingBalance;
use leptos::prelude::*;
use thaw::*;

/// Бейдж разницы кассы: цвет по `ClosingBalance`, текст: сумма со знаком
pub fn balance_badge(difference: f64) -> impl IntoView {
    let balance = ClosingBalance::classify(difference);
    let color = match balance {
        ClosingBalance::Balanced => BadgeColor::Success,
        ClosingBalance::Surplus => BadgeColor::Warning,
        ClosingBalance::Shortage => BadgeColor::Danger,
    };
    let text = match balance {
        ClosingBalance::Balanced => balance.label().to_string(),
        _ => format!("{} {}", balance.label(), format_money_signed(difference)),
    };
    view! {
        <Badge appearance=BadgeAppearance::Tint color=color>{text}</Badge>
    }
}
