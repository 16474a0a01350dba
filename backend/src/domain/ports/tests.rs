use super::*;
use rstest::rstest;

#[rstest]
#[case(UserPersistenceError::connection("refused"), "user repository connection failed: refused")]
#[case(UserPersistenceError::query("syntax"), "user repository query failed: syntax")]
fn user_persistence_errors_render_context(
    #[case] error: UserPersistenceError,
    #[case] expected: &str,
) {
    assert_eq!(error.to_string(), expected);
}

#[rstest]
#[case(BookPersistenceError::connection("timeout"), "book repository connection failed: timeout")]
#[case(BookPersistenceError::query("deadlock"), "book repository query failed: deadlock")]
fn book_persistence_errors_render_context(
    #[case] error: BookPersistenceError,
    #[case] expected: &str,
) {
    assert_eq!(error.to_string(), expected);
}

#[rstest]
fn constructors_accept_owned_strings() {
    let message = String::from("pool closed");
    assert_eq!(
        UserPersistenceError::connection(message.clone()),
        UserPersistenceError::Connection { message }
    );
}
