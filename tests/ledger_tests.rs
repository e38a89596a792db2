//! Loan ledger tests: availability invariants under sequential and
//! concurrent borrow/return operations.

mod common;

use common::{available, loan_rows, seed_book, seed_user, test_state};

#[tokio::test]
async fn borrow_decrements_availability_and_records_loan() {
    let state = test_state("borrow-basic").await;
    let book_id = seed_book(&state, "The Trial", 3).await;
    let user_id = seed_user(&state, "josef").await;

    let borrowed = state.services.loans.borrow(book_id, user_id).await.unwrap();

    assert!(borrowed);
    assert_eq!(available(&state, book_id).await, 2);
    assert_eq!(loan_rows(&state, book_id).await, 1);

    let loans = state.services.loans.loans_for_user(user_id).await.unwrap();
    assert_eq!(loans.len(), 1);
    assert_eq!(loans[0].book_id, book_id);
    assert_eq!(loans[0].title, "The Trial");
    assert!(!loans[0].is_returned);
    assert!(loans[0].return_date.is_none());
}

#[tokio::test]
async fn borrow_unavailable_book_returns_false_without_loan_row() {
    let state = test_state("borrow-unavailable").await;
    let book_id = seed_book(&state, "Rare Edition", 1).await;
    let first = seed_user(&state, "first").await;
    let second = seed_user(&state, "second").await;

    assert!(state.services.loans.borrow(book_id, first).await.unwrap());
    assert!(!state.services.loans.borrow(book_id, second).await.unwrap());

    assert_eq!(available(&state, book_id).await, 0);
    assert_eq!(loan_rows(&state, book_id).await, 1);
}

#[tokio::test]
async fn borrow_missing_book_returns_false() {
    let state = test_state("borrow-missing").await;
    let user_id = seed_user(&state, "reader").await;

    let borrowed = state.services.loans.borrow(9999, user_id).await.unwrap();

    assert!(!borrowed);
}

#[tokio::test]
async fn borrow_then_return_restores_availability() {
    let state = test_state("round-trip").await;
    let book_id = seed_book(&state, "Dead Souls", 2).await;
    let user_id = seed_user(&state, "chichikov").await;

    assert!(state.services.loans.borrow(book_id, user_id).await.unwrap());
    assert_eq!(available(&state, book_id).await, 1);

    assert!(state
        .services
        .loans
        .return_book(book_id, user_id)
        .await
        .unwrap());
    assert_eq!(available(&state, book_id).await, 2);

    // The loan row survives, marked returned with a timestamp
    assert_eq!(loan_rows(&state, book_id).await, 1);
    let outstanding = state.services.loans.loans_for_user(user_id).await.unwrap();
    assert!(outstanding.is_empty());
}

#[tokio::test]
async fn return_without_outstanding_loan_is_a_noop() {
    let state = test_state("return-noop").await;
    let book_id = seed_book(&state, "Oblomov", 2).await;
    let user_id = seed_user(&state, "stolz").await;

    let returned = state
        .services
        .loans
        .return_book(book_id, user_id)
        .await
        .unwrap();

    assert!(!returned);
    // Availability must not be inflated by a stray return
    assert_eq!(available(&state, book_id).await, 2);
}

#[tokio::test]
async fn double_return_after_single_borrow_fails_the_second_time() {
    let state = test_state("double-return").await;
    let book_id = seed_book(&state, "The Nose", 1).await;
    let user_id = seed_user(&state, "kovalyov").await;

    assert!(state.services.loans.borrow(book_id, user_id).await.unwrap());
    assert!(state
        .services
        .loans
        .return_book(book_id, user_id)
        .await
        .unwrap());
    assert!(!state
        .services
        .loans
        .return_book(book_id, user_id)
        .await
        .unwrap());

    assert_eq!(available(&state, book_id).await, 1);
}

#[tokio::test]
async fn same_title_borrowed_twice_returns_one_loan_at_a_time() {
    let state = test_state("one-at-a-time").await;
    let book_id = seed_book(&state, "War and Peace", 2).await;
    let user_id = seed_user(&state, "pierre").await;

    assert!(state.services.loans.borrow(book_id, user_id).await.unwrap());
    assert!(state.services.loans.borrow(book_id, user_id).await.unwrap());
    assert_eq!(available(&state, book_id).await, 0);

    // One return settles exactly one of the two loans
    assert!(state
        .services
        .loans
        .return_book(book_id, user_id)
        .await
        .unwrap());
    assert_eq!(available(&state, book_id).await, 1);

    let outstanding = state.services.loans.loans_for_user(user_id).await.unwrap();
    assert_eq!(outstanding.len(), 1);

    assert!(state
        .services
        .loans
        .return_book(book_id, user_id)
        .await
        .unwrap());
    assert_eq!(available(&state, book_id).await, 2);
}

#[tokio::test]
async fn concurrent_borrows_of_last_copy_exactly_one_succeeds() {
    let state = test_state("concurrent-last-copy").await;
    let book_id = seed_book(&state, "Single Copy", 1).await;
    let user_a = seed_user(&state, "alice").await;
    let user_b = seed_user(&state, "bob").await;

    let loans_a = state.services.loans.clone();
    let loans_b = state.services.loans.clone();
    let task_a = tokio::spawn(async move { loans_a.borrow(book_id, user_a).await });
    let task_b = tokio::spawn(async move { loans_b.borrow(book_id, user_b).await });

    let result_a = task_a.await.unwrap().unwrap();
    let result_b = task_b.await.unwrap().unwrap();

    assert!(
        result_a ^ result_b,
        "exactly one of two concurrent borrows must succeed"
    );
    assert_eq!(available(&state, book_id).await, 0);
    assert_eq!(loan_rows(&state, book_id).await, 1);
}

#[tokio::test]
async fn concurrent_borrows_never_oversell() {
    let state = test_state("concurrent-stress").await;
    let book_id = seed_book(&state, "Popular Title", 3).await;

    let mut tasks = Vec::new();
    for i in 0..8 {
        let user_id = seed_user(&state, &format!("reader{}", i)).await;
        let loans = state.services.loans.clone();
        tasks.push(tokio::spawn(
            async move { loans.borrow(book_id, user_id).await },
        ));
    }

    let mut successes = 0;
    for task in tasks {
        if task.await.unwrap().unwrap() {
            successes += 1;
        }
    }

    assert_eq!(successes, 3);
    assert_eq!(available(&state, book_id).await, 0);
    assert_eq!(loan_rows(&state, book_id).await, 3);
}

#[tokio::test]
async fn shrinking_quantity_clamps_availability() {
    use biblio_server::models::book::UpdateBook;

    let state = test_state("quantity-shrink").await;
    let book_id = seed_book(&state, "Overstocked", 5).await;

    let book = state
        .services
        .catalog
        .update_book(
            book_id,
            UpdateBook {
                title: "Overstocked".to_string(),
                author_id: None,
                genre: None,
                description: None,
                quantity: 2,
            },
        )
        .await
        .unwrap();

    assert_eq!(book.quantity, 2);
    assert_eq!(book.available_quantity, 2);
}
