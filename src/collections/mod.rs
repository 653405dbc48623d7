pub mod singly_linked_list;

pub use singly_linked_list::{
    SinglyLinkedList, SinglyLinkedListError, SinglyLinkedListNode, SinglyLinkedListResult,
};
