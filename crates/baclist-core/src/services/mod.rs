/// `ChangeList-Error` body shared by the list-element services.
pub mod change_list_error;
/// AddListElement / RemoveListElement request codec.
pub mod list_element;
/// Application- and context-tagged value codec.
pub mod value_codec;

pub use change_list_error::ChangeListError;
pub use list_element::{
    ListElementRequest, ListElementService, SERVICE_ADD_LIST_ELEMENT,
    SERVICE_REMOVE_LIST_ELEMENT,
};
