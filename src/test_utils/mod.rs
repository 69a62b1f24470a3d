#![allow(missing_docs)]

pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;
pub(crate) mod state;

pub(crate) use form::{
    assert_form_error_message, assert_form_input, assert_form_submit_button_with_text,
    assert_hx_endpoint, must_get_form,
};
pub(crate) use html::{
    assert_valid_html, balance_text, element_text, has_element, must_select,
    parse_html_document, parse_html_fragment,
};
pub(crate) use http::{assert_content_type, assert_status_ok};
pub(crate) use state::{get_test_ledger, get_test_storage, get_tracker_state};
