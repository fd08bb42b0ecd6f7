pub mod shell;
pub mod text;

pub use shell::Shell;
pub use text::TextPresenter;
