use maud::{DOCTYPE, Markup, PreEscaped, html};

// Button styles
pub const BUTTON_SECONDARY_STYLE: &str = "px-4 py-2 text-sm font-medium \
    text-white bg-gray-500 rounded hover:bg-gray-600 dark:bg-gray-600 \
    dark:hover:bg-gray-700";

pub const BUTTON_INCOME_STYLE: &str = "w-full sm:w-auto px-6 sm:px-8 py-3 sm:py-4 \
    bg-green-500 hover:bg-green-600 text-white rounded-lg text-lg sm:text-xl";

pub const BUTTON_EXPENSE_STYLE: &str = "w-full sm:w-auto px-6 sm:px-8 py-3 sm:py-4 \
    bg-red-500 hover:bg-red-600 text-white rounded-lg text-lg sm:text-xl";

pub const BUTTON_LINK_STYLE: &str = "text-gray-500 hover:text-gray-700 \
    dark:text-gray-400 dark:hover:text-gray-200 bg-transparent border-none \
    cursor-pointer";

// Form styles
pub const FORM_CONTAINER_STYLE: &str = "w-full max-w-md mx-auto p-4 sm:p-6 \
    bg-white dark:bg-gray-800 rounded-lg shadow text-gray-900 dark:text-white";
pub const FORM_LABEL_STYLE: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
pub const FORM_TEXT_INPUT_STYLE: &str = "block w-full p-2.5 rounded text-sm \
    text-gray-900 dark:text-white disabled:text-gray-500 bg-gray-50 \
    dark:bg-gray-700 border border-gray-300 dark:border-gray-600 \
    dark:placeholder-gray-400 focus:ring-blue-600 focus:border-blue-600 \
    focus:dark:border-blue-500 focus:dark:ring-blue-500";

// Amount styles
pub const POSITIVE_AMOUNT_STYLE: &str = "text-green-600 dark:text-green-500";
pub const NEGATIVE_AMOUNT_STYLE: &str = "text-red-600 dark:text-red-500";

// Page container
pub const PAGE_CONTAINER_STYLE: &str =
    "flex flex-col px-6 py-8 mx-auto max-w-3xl min-h-screen text-gray-900 dark:text-white";

/// Extra elements for a page's `head`.
pub enum HeadElement {
    /// CSS source code.
    Style(PreEscaped<String>),
}

pub fn base(title: &str, head_elements: &[HeadElement], content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="theme-color" content="#16a34a";
                title { (title) " - Cashbook" }
                link rel="manifest" href="/manifest.json";
                link rel="icon" type="image/svg+xml" href="/static/icons/icon-192x192.svg";
                link href="/static/main.css" rel="stylesheet";

                script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                script src="https://unpkg.com/htmx.org@2.0.8/dist/htmx.min.js" {}
                script src="https://unpkg.com/htmx-ext-response-targets@2.0.4/dist/response-targets.js" {}

                @for element in head_elements
                {
                    @match element
                    {
                        HeadElement::Style(text) => style { (text) }
                    }
                }
            }

            body
                hx-ext="response-targets"
                class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900"
            {
                (content)

                // Alert container for out-of-band swaps
                div
                    id="alert-container"
                    class="hidden w-full max-w-md px-4"
                    style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
                {}
            }
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    // Template adapted from https://flowbite.com/blocks/marketing/404/
    let content = html!(
        section class="bg-white dark:bg-gray-900"
        {
            div class="py-8 px-4 mx-auto max-w-screen-xl lg:py-16 lg:px-6"
            {
                div class="mx-auto max-w-screen-sm text-center"
                {
                    h1
                        class="mb-4 text-7xl tracking-tight font-extrabold
                            lg:text-9xl text-green-600 dark:text-green-500"
                    {
                        (header)
                    }

                    p
                        class="mb-4 text-3xl md:text-4xl tracking-tight
                            font-bold text-gray-900 dark:text-white"
                    {
                        (description)
                    }

                    p
                        class="mb-4 text-1xl md:text-2xl tracking-tight
                            text-gray-900 dark:text-white"
                    {
                        (fix)
                    }

                    a
                        href="/"
                        class="inline-flex text-white bg-green-600
                            hover:bg-green-800 focus:ring-4 focus:outline-hidden
                            focus:ring-green-300 font-medium rounded text-sm px-5
                            py-2.5 text-center dark:focus:ring-green-900 my-4"
                    {
                        "Back to Homepage"
                    }
                }
            }
        }
    );

    base(title, &[], &content)
}

/// Returns the CSS styles for adding a currency prefix to number inputs.
pub fn currency_input_styles(currency_symbol: &str) -> HeadElement {
    // The symbol is user config, so escape it for the CSS string literal.
    let symbol = currency_symbol.replace('\\', "\\\\").replace('\'', "\\'");

    HeadElement::Style(PreEscaped(format!(
        r#"
        .input-wrapper {{
            position: relative;
            display: block;
        }}
        .input-wrapper input[type="number"] {{
            padding-left: 1.6rem;
        }}
        .input-wrapper::before {{
            content: '{symbol}';
            position: absolute;
            left: 0.6rem;
            top: 50%;
            transform: translateY(-50%);
            pointer-events: none;
        }}
        "#
    )))
}

/// Format `number` as money with two decimal places, e.g. "₹1000.00" or "-₹12.50".
pub fn format_currency(currency_symbol: &str, number: f64) -> String {
    if number < 0.0 {
        format!("-{currency_symbol}{:.2}", number.abs())
    } else {
        // Avoid rendering negative zero as "-0.00".
        format!("{currency_symbol}{:.2}", number.abs())
    }
}
