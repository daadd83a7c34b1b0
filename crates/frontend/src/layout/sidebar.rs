//! Боковое меню: группы разделов, раскрываются по клику

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    items: Vec<(&'static str, &'static str, &'static str)>, // (id, label, icon)
}

fn menu_item(id: &'static str, icon: &'static str) -> (&'static str, &'static str, &'static str) {
    (id, tab_label_for_key(id), icon)
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        // Группа без детей открывает вкладку со своим id
        MenuGroup {
            id: "d400_overview",
            label: tab_label_for_key("d400_overview"),
            icon: "dashboard",
            items: vec![],
        },
        MenuGroup {
            id: "a001_product",
            label: tab_label_for_key("a001_product"),
            icon: "package",
            items: vec![],
        },
        MenuGroup {
            id: "sales",
            label: "Ventas",
            icon: "cart",
            items: vec![
                menu_item("a003_sale_entry", "barcode"),
                menu_item("a003_sale", "receipt"),
            ],
        },
        MenuGroup {
            id: "purchases",
            label: "Compras",
            icon: "truck",
            items: vec![
                menu_item("a002_provider", "building"),
                menu_item("a004_purchase", "truck"),
            ],
        },
        MenuGroup {
            id: "d401_finance",
            label: tab_label_for_key("d401_finance"),
            icon: "cash",
            items: vec![],
        },
    ]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let expanded_groups = RwSignal::new(vec!["sales".to_string(), "purchases".to_string()]);

    view! {
        <div class="app-sidebar__content">
            {get_menu_groups().into_iter().map(|group| {
                let has_children = !group.items.is_empty();
                let group_id = group.id;

                view! {
                    <div>
                        <div
                            class="app-sidebar__item"
                            class:app-sidebar__item--active=move || !has_children && ctx.is_active(group_id)
                            on:click=move |_| {
                                if has_children {
                                    expanded_groups.update(|items| {
                                        if let Some(pos) = items.iter().position(|x| x == group_id) {
                                            items.remove(pos);
                                        } else {
                                            items.push(group_id.to_string());
                                        }
                                    });
                                } else {
                                    ctx.open_tab(group_id, group.label);
                                }
                            }
                        >
                            <div class="app-sidebar__item-content">
                                {icon(group.icon)}
                                <span>{group.label}</span>
                            </div>
                            {has_children.then(|| view! {
                                <div
                                    class="app-sidebar__chevron"
                                    class:app-sidebar__chevron--expanded=move || {
                                        expanded_groups.with(|g| g.iter().any(|x| x == group_id))
                                    }
                                >
                                    {icon("chevron-right")}
                                </div>
                            })}
                        </div>

                        {has_children.then(|| {
                            let items = group.items.clone();
                            view! {
                                <Show when=move || expanded_groups.with(|g| g.iter().any(|x| x == group_id))>
                                    <div class="app-sidebar__children">
                                        {items.clone().into_iter().map(|(id, label, icon_name)| view! {
                                            <div
                                                class="app-sidebar__item"
                                                class:app-sidebar__item--active=move || ctx.is_active(id)
                                                on:click=move |_| ctx.open_tab(id, label)
                                            >
                                                <div class="app-sidebar__item-content">
                                                    {icon(icon_name)}
                                                    <span>{label}</span>
                                                </div>
                                            </div>
                                        }).collect_view()}
                                    </div>
                                </Show>
                            }
                        })}
                    </div>
                }
            }).collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_menu_item_has_label() {
        for group in get_menu_groups() {
            assert!(!group.label.is_empty(), "group {}", group.id);
            for (id, label, _) in group.items {
                assert!(!label.is_empty(), "item {}", id);
            }
        }
    }
}
