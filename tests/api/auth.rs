use crate::helpers::{
    add_new_project, get_json_response_body, get_random_email, TestApp,
    TEST_PASSWORD,
};
use tasktrace::ErrorResponse;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn signup_should_return_201_for_valid_requests(app: &mut TestApp) {
    let user = app.anonymous_user();
    let email = get_random_email();

    let response = user
        .post_signup(&serde_json::json!({
            "name": "Ted Crilly",
            "email": email,
            "password": TEST_PASSWORD
        }))
        .await;

    assert_eq!(response.status().as_u16(), 201);
}

#[test_context(TestApp)]
#[tokio::test]
async fn signup_should_return_409_for_duplicate_email(app: &mut TestApp) {
    let user = app.anonymous_user();
    let email = get_random_email();
    let request = serde_json::json!({
        "name": "Ted Crilly",
        "email": email,
        "password": TEST_PASSWORD
    });

    assert_eq!(user.post_signup(&request).await.status().as_u16(), 201);

    let response = user.post_signup(&request).await;
    assert_eq!(response.status().as_u16(), 409);
    assert_eq!(
        response
            .json::<ErrorResponse>()
            .await
            .expect("Could not deserialise response body to ErrorResponse")
            .error,
        "User already exists"
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn signup_should_return_400_for_invalid_input(app: &mut TestApp) {
    let user = app.anonymous_user();

    let test_cases = [
        serde_json::json!({
            "name": "Ted Crilly",
            "email": "not-an-email",
            "password": TEST_PASSWORD
        }),
        serde_json::json!({
            "name": "Ted Crilly",
            "email": get_random_email(),
            "password": "2short"
        }),
        serde_json::json!({
            "name": "",
            "email": get_random_email(),
            "password": TEST_PASSWORD
        }),
    ];

    for test_case in test_cases.iter() {
        let response = user.post_signup(test_case).await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "Should fail with HTTP400 for input: {test_case}"
        );
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn signup_should_return_422_for_malformed_requests(app: &mut TestApp) {
    let user = app.anonymous_user();

    let test_cases = [
        serde_json::json!({ "email": get_random_email() }),
        serde_json::json!({ "name": true }),
    ];

    for test_case in test_cases.iter() {
        let response = user.post_signup(test_case).await;
        assert_eq!(
            response.status().as_u16(),
            422,
            "Failed for input: {test_case}"
        );
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn login_should_return_200_and_user_id(app: &mut TestApp) {
    let user = app.signed_in_user().await;
    assert!(
        uuid::Uuid::try_parse(&user.user_id).is_ok(),
        "userId should be a valid UUID: {}",
        user.user_id
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn login_should_return_401_for_wrong_password(app: &mut TestApp) {
    let user = app.signed_in_user().await;

    let response = user
        .post_login(&serde_json::json!({
            "email": user.email,
            "password": "WrongP@55word"
        }))
        .await;

    assert_eq!(response.status().as_u16(), 401);
}

#[test_context(TestApp)]
#[tokio::test]
async fn login_should_return_401_for_unknown_user(app: &mut TestApp) {
    let user = app.anonymous_user();

    let response = user
        .post_login(&serde_json::json!({
            "email": get_random_email(),
            "password": TEST_PASSWORD
        }))
        .await;

    assert_eq!(response.status().as_u16(), 401);
}

#[test_context(TestApp)]
#[tokio::test]
async fn logout_should_invalidate_the_session(app: &mut TestApp) {
    let user = app.signed_in_user().await;
    let project_id = add_new_project(&user, "Craggy Island", false).await;

    assert_eq!(
        user.get_project(&project_id).await.status().as_u16(),
        200
    );

    assert_eq!(user.post_logout().await.status().as_u16(), 200);

    assert_eq!(
        user.get_project(&project_id).await.status().as_u16(),
        401,
        "Banned token should be rejected after logout"
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn logout_without_session_should_return_401(app: &mut TestApp) {
    let user = app.anonymous_user();
    assert_eq!(user.post_logout().await.status().as_u16(), 401);
}

#[test_context(TestApp)]
#[tokio::test]
async fn delete_user_should_remove_owned_projects_and_memberships(
    app: &mut TestApp,
) {
    let owner = app.signed_in_user().await;
    let member = app.signed_in_user().await;

    let project_id = add_new_project(&owner, "Craggy Island", false).await;
    crate::helpers::join_via_invitation(&owner, &member, &project_id).await;

    let response = member.delete_user().await;
    assert_eq!(response.status().as_u16(), 200);

    // The member's row is gone but the project survives.
    let response = owner.get_members(&project_id).await;
    let body = get_json_response_body(response).await;
    assert_eq!(
        body.get("members").unwrap().as_array().unwrap().len(),
        1,
        "Deleted user's membership should be removed"
    );

    let response = owner.delete_user().await;
    assert_eq!(response.status().as_u16(), 200);

    // Owned projects are deleted with the account.
    let other = app.signed_in_user().await;
    assert_eq!(
        other.get_project(&project_id).await.status().as_u16(),
        404,
        "Owned project should be deleted with the account"
    );
}
