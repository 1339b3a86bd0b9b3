use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;

/// One breadcrumb entry; the last one is rendered without a link
#[derive(Clone, Debug, PartialEq)]
pub struct Breadcrumb {
    pub title: &'static str,
    pub page: Option<&'static str>,
}

/// Page title with breadcrumbs and an actions slot
#[component]
pub fn PageHeader(
    #[prop(into)]
    title: String,

    #[prop(optional)]
    breadcrumbs: Vec<Breadcrumb>,

    /// Action buttons
    #[prop(optional)]
    children: Option<Children>,
) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>();

    view! {
        <div class="page-header">
            <div class="page-header__content">
                <nav class="breadcrumbs">
                    {breadcrumbs.into_iter().map(|crumb| match (crumb.page, ctx) {
                        (Some(page), Some(ctx)) => view! {
                            <a class="breadcrumbs__item" href="#" on:click=move |ev| {
                                ev.prevent_default();
                                ctx.go(page);
                            }>{crumb.title}</a>
                        }.into_any(),
                        _ => view! {
                            <span class="breadcrumbs__item breadcrumbs__item--current">{crumb.title}</span>
                        }.into_any(),
                    }).collect_view()}
                </nav>
                <h1 class="page-header__title">{title}</h1>
            </div>
            <div class="page-header__actions">
                {children.map(|c| c())}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actions_are_optional() {
        let props = PageHeaderProps::builder()
            .title("Create Store")
            .breadcrumbs(vec![Breadcrumb {
                title: "Stores",
                page: Some("stores"),
            }])
            .build();
        assert!(props.children.is_none());
        assert_eq!(props.title, "Create Store");
    }
}
