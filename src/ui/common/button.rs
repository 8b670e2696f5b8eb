use leptos::prelude::*;

/// Button variant types
#[derive(Clone, Copy, PartialEq)]
pub enum ButtonVariant {
    DarkBlue,
    Light,
}

impl ButtonVariant {
    fn class(&self) -> &'static str {
        match self {
            ButtonVariant::DarkBlue => "btn-dark-blue",
            ButtonVariant::Light => "btn-light",
        }
    }
}

/// Styled button; use `button_type="submit"` inside forms
#[component]
pub fn Button(
    /// Button variant style
    #[prop(default = ButtonVariant::DarkBlue)]
    variant: ButtonVariant,
    /// HTML button type
    #[prop(default = "button")]
    button_type: &'static str,
    /// Click handler
    #[prop(optional)]
    on_click: Option<Callback<()>>,
    /// Whether button is disabled
    #[prop(into, default = Signal::stored(false))]
    disabled: Signal<bool>,
    /// Button content (text or elements)
    children: Children,
) -> impl IntoView {
    let classes = format!("btn-base {}", variant.class());

    view! {
        <button
            type=button_type
            class=classes
            on:click=move |_| {
                if let Some(callback) = on_click.as_ref() {
                    callback.run(());
                }
            }
            disabled=move || disabled.get()
        >
            {children()}
        </button>
    }
}
