mod common;
mod preapproval;
mod recommendation;
mod sensitivity;
