use crate::dashboards::d400_overview::summary::{
    last_closing, latest_sales, low_stock_top, StockCounts, TodaySales,
};
use crate::domain::a001_product::api as product_api;
use crate::domain::a003_sale::api::{self as sale_api, SalesQuery};
use crate::domain::a005_cash_closing::api::{self as closing_api, ClosingsQuery};
use crate::domain::a005_cash_closing::ui::balance_badge;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_labels::tab_label_for_key;
use crate::shared::components::stat_card::{StatCard, StatFormat, StatTone};
use crate::shared::components::table::{format_money, format_money_signed};
use crate::shared::date_utils::{format_date, format_time, today};
use crate::shared::icons::icon;
use crate::shared::page_frame::{ErrorBox, PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use chrono::Datelike;
use contracts::domain::a001_product::Product;
use contracts::domain::a003_sale::Sale;
use contracts::domain::a005_cash_closing::{CashRegisterClosing, ClosingBalance};
use contracts::shared::period::{month_bounds, previous_month};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

const LOW_STOCK_ROWS: usize = 10;
const LATEST_SALES_ROWS: usize = 5;

/// Ссылка-кнопка, открывающая вкладку раздела
#[component]
fn SectionLink(tab_key: &'static str, label: &'static str) -> impl IntoView {
    let tabs_store =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    view! {
        <Button
            appearance=ButtonAppearance::Subtle
            size=ButtonSize::Small
            on_click=move |_| tabs_store.open_tab(tab_key, tab_label_for_key(tab_key))
        >
            {label}
        </Button>
    }
}

#[component]
pub fn OverviewDashboard() -> impl IntoView {
    // Каждый блок загружается и падает независимо
    let (sales, set_sales) = signal(None::<Vec<Sale>>);
    let (sales_error, set_sales_error) = signal(None::<String>);
    let (products, set_products) = signal(None::<Vec<Product>>);
    let (products_error, set_products_error) = signal(None::<String>);
    let (closings, set_closings) = signal(None::<Vec<CashRegisterClosing>>);
    let (closings_error, set_closings_error) = signal(None::<String>);

    let load_all = move || {
        let date = today();
        let today_iso = date.format("%Y-%m-%d").to_string();

        set_sales_error.set(None);
        let query = SalesQuery {
            desde: today_iso.clone(),
            hasta: today_iso.clone(),
        };
        spawn_local(async move {
            match sale_api::fetch_sales(&query).await {
                Ok(list) => set_sales.set(Some(list)),
                Err(e) => {
                    log::error!("overview sales: {}", e);
                    set_sales_error.set(Some(format!("Ventas de hoy: {}", e)));
                }
            }
        });

        set_products_error.set(None);
        spawn_local(async move {
            match product_api::fetch_products().await {
                Ok(list) => set_products.set(Some(list)),
                Err(e) => {
                    log::error!("overview products: {}", e);
                    set_products_error.set(Some(format!("Stock: {}", e)));
                }
            }
        });

        // Последнее закрытие ищется с начала прошлого месяца
        set_closings_error.set(None);
        let (year, month) = previous_month(date.year(), date.month());
        let desde = month_bounds(year, month)
            .map(|(first, _)| first.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| today_iso.clone());
        let query = ClosingsQuery { desde, hasta: today_iso };
        spawn_local(async move {
            match closing_api::fetch_closings(&query).await {
                Ok(list) => set_closings.set(Some(list)),
                Err(e) => {
                    log::error!("overview closings: {}", e);
                    set_closings_error.set(Some(format!("Cierres de caja: {}", e)));
                }
            }
        });
    };

    load_all();

    let today_sales = Signal::derive(move || sales.with(|s| s.as_deref().map(TodaySales::from_sales)));
    let stock_counts =
        Signal::derive(move || products.with(|p| p.as_deref().map(StockCounts::from_products)));
    let last = Signal::derive(move || {
        closings.with(|c| c.as_deref().and_then(last_closing).cloned())
    });

    let closing_tone = Signal::derive(move || match last.get().map(|c| c.balance()) {
        Some(ClosingBalance::Balanced) => StatTone::Good,
        Some(ClosingBalance::Surplus) => StatTone::Warning,
        Some(ClosingBalance::Shortage) => StatTone::Bad,
        None => StatTone::Neutral,
    });

    view! {
        <PageFrame page_id="d400_overview--dashboard" category=PAGE_CAT_DASHBOARD>
            <PageHeader
                title="Principal"
                subtitle=Signal::derive(move || Some(format_date(&today().format("%Y-%m-%d").to_string())))
            >
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| load_all()>
                    {icon("refresh")}
                    "Actualizar"
                </Button>
            </PageHeader>

            <div class="page__content">
                <div class="stat-grid">
                    <StatCard
                        label="Ventas de hoy"
                        icon_name="trending-up"
                        value=Signal::derive(move || today_sales.get().map(|t| t.total))
                        format=StatFormat::Money
                        subtitle=Signal::derive(move || today_sales.get().map(|t| format!("{} ventas", t.count)))
                    />
                    <StatCard
                        label="Stock bajo"
                        icon_name="package"
                        value=Signal::derive(move || stock_counts.get().map(|c| c.low as f64))
                        format=StatFormat::Integer
                        tone=Signal::derive(move || match stock_counts.get() {
                            Some(c) if c.low > 0 => StatTone::Warning,
                            _ => StatTone::Neutral,
                        })
                    />
                    <StatCard
                        label="Sin stock"
                        icon_name="alert"
                        value=Signal::derive(move || stock_counts.get().map(|c| c.out as f64))
                        format=StatFormat::Integer
                        tone=Signal::derive(move || match stock_counts.get() {
                            Some(c) if c.out > 0 => StatTone::Bad,
                            _ => StatTone::Neutral,
                        })
                    />
                    <StatCard
                        label="Último cierre de caja"
                        icon_name="cash"
                        value=Signal::derive(move || last.get().map(|c| c.difference))
                        format=StatFormat::Money
                        tone=closing_tone
                        subtitle=Signal::derive(move || {
                            last.get().map(|c| format!("{} · {}", format_date(&c.date), c.balance().label()))
                        })
                    />
                </div>

                <ErrorBox message=sales_error />
                <ErrorBox message=products_error />
                <ErrorBox message=closings_error />

                <div class="dashboard-columns">
                    <section class="dashboard-section">
                        <div class="dashboard-section__header">
                            <h3>"Productos con stock bajo"</h3>
                            <SectionLink tab_key="a001_product" label="Ver stock" />
                        </div>
                        <Table attr:style="width: 100%;">
                            <TableHeader>
                                <TableRow>
                                    <TableHeaderCell>"Producto"</TableHeaderCell>
                                    <TableHeaderCell>"Stock"</TableHeaderCell>
                                    <TableHeaderCell>"Mínimo"</TableHeaderCell>
                                </TableRow>
                            </TableHeader>
                            <TableBody>
                                <For
                                    each=move || products.with(|p| p.as_deref().map(|p| low_stock_top(p, LOW_STOCK_ROWS)).unwrap_or_default())
                                    key=|p| (p.id, p.stock)
                                    children=move |p: Product| {
                                        let out = p.stock <= 0;
                                        view! {
                                            <TableRow>
                                                <TableCell>
                                                    <TableCellLayout truncate=true>{p.name.clone()}</TableCellLayout>
                                                </TableCell>
                                                <TableCell class="text-right">
                                                    <span class:text-danger=out>{p.stock}</span>
                                                </TableCell>
                                                <TableCell class="text-right">{p.min_stock}</TableCell>
                                            </TableRow>
                                        }
                                    }
                                />
                            </TableBody>
                        </Table>
                        <Show when=move || stock_counts.get().is_some_and(|c| c.low + c.out == 0)>
                            <div class="table__empty">
                                {icon("check")}
                                "Todo el stock está por encima del mínimo"
                            </div>
                        </Show>
                    </section>

                    <section class="dashboard-section">
                        <div class="dashboard-section__header">
                            <h3>"Últimas ventas"</h3>
                            <SectionLink tab_key="a003_sale" label="Ver ventas" />
                        </div>
                        <Table attr:style="width: 100%;">
                            <TableHeader>
                                <TableRow>
                                    <TableHeaderCell>"Hora"</TableHeaderCell>
                                    <TableHeaderCell>"Medio de pago"</TableHeaderCell>
                                    <TableHeaderCell>"Total"</TableHeaderCell>
                                </TableRow>
                            </TableHeader>
                            <TableBody>
                                <For
                                    each=move || sales.with(|s| s.as_deref().map(|s| latest_sales(s, LATEST_SALES_ROWS)).unwrap_or_default())
                                    key=|s| s.id
                                    children=move |s: Sale| view! {
                                        <TableRow>
                                            <TableCell>{format_time(&s.created_at)}</TableCell>
                                            <TableCell>{s.payment_method.label()}</TableCell>
                                            <TableCell class="text-right"><strong>{format_money(s.total)}</strong></TableCell>
                                        </TableRow>
                                    }
                                />
                            </TableBody>
                        </Table>
                        <Show when=move || sales.with(|s| s.as_ref().is_some_and(Vec::is_empty))>
                            <div class="table__empty">"Todavía no hay ventas hoy"</div>
                        </Show>
                    </section>
                </div>

                {move || last.get().map(|c| view! {
                    <section class="dashboard-section">
                        <div class="dashboard-section__header">
                            <h3>{format!("Cierre del {}", format_date(&c.date))}</h3>
                            <SectionLink tab_key="d401_finance" label="Ver finanzas" />
                        </div>
                        <div class="summary-block">
                            <div class="summary-row"><span>"Total vendido"</span><strong>{format_money(c.total_sales)}</strong></div>
                            <div class="summary-row"><span>"Efectivo esperado"</span><span>{format_money(c.expected_cash)}</span></div>
                            <div class="summary-row"><span>"Efectivo contado"</span><span>{format_money(c.actual_cash)}</span></div>
                            <div class="summary-row">
                                <span>{format!("Diferencia ({})", format_money_signed(c.difference))}</span>
                                {balance_badge(c.difference)}
                            </div>
                        </div>
                    </section>
                })}
            </div>
        </PageFrame>
    }
}
