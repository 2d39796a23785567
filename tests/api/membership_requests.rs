use crate::helpers::{
    add_new_project, get_json_response_body, join_via_invitation,
    member_id_of, promote_to_admin, TestApp, TestUser,
};
use serde_json::json;
use tasktrace::ErrorResponse;
use test_context::test_context;

async fn submit_request(
    requester: &TestUser,
    project_id: &str,
) -> String {
    let response = requester
        .post_request_membership(&json!({
            "projectId": project_id,
            "userId": requester.user_id
        }))
        .await;
    assert_eq!(
        response.status().as_u16(),
        201,
        "Failed to submit membership request"
    );
    let body = get_json_response_body(response).await;
    assert_eq!(body.get("status").unwrap(), "PENDING");
    body.get("requestId")
        .expect("No requestId in response")
        .as_str()
        .expect("requestId should be a string")
        .to_owned()
}

#[test_context(TestApp)]
#[tokio::test]
async fn submitting_creates_a_pending_request(app: &mut TestApp) {
    let owner = app.signed_in_user().await;
    let requester = app.signed_in_user().await;

    let project_id = add_new_project(&owner, "Craggy Island", false).await;
    let request_id = submit_request(&requester, &project_id).await;
    assert!(uuid::Uuid::try_parse(&request_id).is_ok());

    let response = owner.get_membership_requests(&project_id).await;
    assert_eq!(response.status().as_u16(), 200);
    let body = get_json_response_body(response).await;
    let requests = body.get("requests").unwrap().as_array().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].get("userId").unwrap(),
        requester.user_id.as_str()
    );
    assert_eq!(requests[0].get("status").unwrap(), "PENDING");
}

#[test_context(TestApp)]
#[tokio::test]
async fn duplicate_pending_requests_are_rejected(app: &mut TestApp) {
    let owner = app.signed_in_user().await;
    let requester = app.signed_in_user().await;

    let project_id = add_new_project(&owner, "Craggy Island", false).await;
    submit_request(&requester, &project_id).await;

    let response = requester
        .post_request_membership(&json!({
            "projectId": project_id,
            "userId": requester.user_id
        }))
        .await;
    assert_eq!(response.status().as_u16(), 409);
    assert_eq!(
        response
            .json::<ErrorResponse>()
            .await
            .expect("Could not deserialise response body")
            .error,
        "You already have a pending request for this project"
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn members_cannot_submit_requests(app: &mut TestApp) {
    let owner = app.signed_in_user().await;
    let member = app.signed_in_user().await;

    let project_id = add_new_project(&owner, "Craggy Island", false).await;
    join_via_invitation(&owner, &member, &project_id).await;

    let response = member
        .post_request_membership(&json!({
            "projectId": project_id,
            "userId": member.user_id
        }))
        .await;
    assert_eq!(response.status().as_u16(), 409);
    assert_eq!(
        response
            .json::<ErrorResponse>()
            .await
            .expect("Could not deserialise response body")
            .error,
        "Already a member of this project"
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn submit_rejects_identity_mismatch(app: &mut TestApp) {
    let owner = app.signed_in_user().await;
    let requester = app.signed_in_user().await;
    let victim = app.signed_in_user().await;

    let project_id = add_new_project(&owner, "Craggy Island", false).await;

    let response = requester
        .post_request_membership(&json!({
            "projectId": project_id,
            "userId": victim.user_id
        }))
        .await;
    assert_eq!(response.status().as_u16(), 401);
}

#[test_context(TestApp)]
#[tokio::test]
async fn submit_returns_404_for_unknown_projects(app: &mut TestApp) {
    let requester = app.signed_in_user().await;

    let response = requester
        .post_request_membership(&json!({
            "projectId": "be9915f0-a4c2-48fb-977b-9f4f959c5729",
            "userId": requester.user_id
        }))
        .await;
    assert_eq!(response.status().as_u16(), 404);
}

#[test_context(TestApp)]
#[tokio::test]
async fn listing_requests_requires_admin_role(app: &mut TestApp) {
    let owner = app.signed_in_user().await;
    let member = app.signed_in_user().await;
    let requester = app.signed_in_user().await;

    let project_id = add_new_project(&owner, "Craggy Island", false).await;
    join_via_invitation(&owner, &member, &project_id).await;
    submit_request(&requester, &project_id).await;

    assert_eq!(
        member
            .get_membership_requests(&project_id)
            .await
            .status()
            .as_u16(),
        403,
        "MEMBER must not view membership requests"
    );
    assert_eq!(
        requester
            .get_membership_requests(&project_id)
            .await
            .status()
            .as_u16(),
        403
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn approval_enrolls_the_requester_as_member(app: &mut TestApp) {
    let owner = app.signed_in_user().await;
    let requester = app.signed_in_user().await;

    let project_id = add_new_project(&owner, "Craggy Island", false).await;
    let request_id = submit_request(&requester, &project_id).await;

    let response = owner
        .post_approve_request(&json!({
            "projectId": project_id,
            "requestId": request_id
        }))
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let body = get_json_response_body(response).await;
    assert_eq!(body.get("status").unwrap(), "APPROVED");

    let response = requester.get_project(&project_id).await;
    assert_eq!(response.status().as_u16(), 200);
    let body = get_json_response_body(response).await;
    assert_eq!(body.get("role").unwrap(), "MEMBER");
}

#[test_context(TestApp)]
#[tokio::test]
async fn approving_twice_fails_without_duplicate_membership(
    app: &mut TestApp,
) {
    let owner = app.signed_in_user().await;
    let requester = app.signed_in_user().await;

    let project_id = add_new_project(&owner, "Craggy Island", false).await;
    let request_id = submit_request(&requester, &project_id).await;

    let approve = json!({
        "projectId": project_id,
        "requestId": request_id
    });

    assert_eq!(
        owner.post_approve_request(&approve).await.status().as_u16(),
        200
    );

    let response = owner.post_approve_request(&approve).await;
    assert_eq!(response.status().as_u16(), 403);
    assert_eq!(
        response
            .json::<ErrorResponse>()
            .await
            .expect("Could not deserialise response body")
            .error,
        "Request has already been processed"
    );

    let response = owner.get_members(&project_id).await;
    let body = get_json_response_body(response).await;
    assert_eq!(
        body.get("members")
            .unwrap()
            .as_array()
            .unwrap()
            .iter()
            .filter(|m| m.get("userId").unwrap()
                == requester.user_id.as_str())
            .count(),
        1,
        "No duplicate member row after a repeated approval"
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn rejected_requests_stay_rejected(app: &mut TestApp) {
    let owner = app.signed_in_user().await;
    let requester = app.signed_in_user().await;

    let project_id = add_new_project(&owner, "Craggy Island", false).await;
    let request_id = submit_request(&requester, &project_id).await;

    let reject = json!({
        "projectId": project_id,
        "requestId": request_id
    });

    let response = owner.post_reject_request(&reject).await;
    assert_eq!(response.status().as_u16(), 200);
    let body = get_json_response_body(response).await;
    assert_eq!(body.get("status").unwrap(), "REJECTED");

    // The requester did not become a member.
    assert_eq!(
        requester.get_project(&project_id).await.status().as_u16(),
        403
    );

    // Terminal in both directions.
    assert_eq!(
        owner.post_reject_request(&reject).await.status().as_u16(),
        403
    );
    assert_eq!(
        owner
            .post_approve_request(&json!({
                "projectId": project_id,
                "requestId": request_id
            }))
            .await
            .status()
            .as_u16(),
        403
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn resubmission_is_allowed_after_rejection(app: &mut TestApp) {
    let owner = app.signed_in_user().await;
    let requester = app.signed_in_user().await;

    let project_id = add_new_project(&owner, "Craggy Island", false).await;
    let request_id = submit_request(&requester, &project_id).await;

    owner
        .post_reject_request(&json!({
            "projectId": project_id,
            "requestId": request_id
        }))
        .await;

    // A fresh request may be submitted and approved.
    let second_request_id = submit_request(&requester, &project_id).await;
    assert_ne!(request_id, second_request_id);

    let response = owner
        .post_approve_request(&json!({
            "projectId": project_id,
            "requestId": second_request_id
        }))
        .await;
    assert_eq!(response.status().as_u16(), 200);
}

#[test_context(TestApp)]
#[tokio::test]
async fn members_cannot_process_requests(app: &mut TestApp) {
    let owner = app.signed_in_user().await;
    let member = app.signed_in_user().await;
    let requester = app.signed_in_user().await;

    let project_id = add_new_project(&owner, "Craggy Island", false).await;
    join_via_invitation(&owner, &member, &project_id).await;
    let request_id = submit_request(&requester, &project_id).await;

    let body = json!({
        "projectId": project_id,
        "requestId": request_id
    });

    assert_eq!(
        member.post_approve_request(&body).await.status().as_u16(),
        403
    );
    assert_eq!(
        member.post_reject_request(&body).await.status().as_u16(),
        403
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn requests_are_scoped_to_their_project(app: &mut TestApp) {
    let owner = app.signed_in_user().await;
    let requester = app.signed_in_user().await;

    let project_id = add_new_project(&owner, "Craggy Island", false).await;
    let other_project_id =
        add_new_project(&owner, "Rugged Island", false).await;
    let request_id = submit_request(&requester, &project_id).await;

    // Approving through the wrong project must not work.
    let response = owner
        .post_approve_request(&json!({
            "projectId": other_project_id,
            "requestId": request_id
        }))
        .await;
    assert_eq!(response.status().as_u16(), 404);
}

// End-to-end: the full request/approve/promote arc from the outside.
#[test_context(TestApp)]
#[tokio::test]
async fn private_project_membership_lifecycle(app: &mut TestApp) {
    let alice = app.signed_in_user().await;
    let bob = app.signed_in_user().await;

    let project_id = add_new_project(&alice, "Craggy Island", false).await;

    // Bob cannot see the private project, so he asks to join.
    assert_eq!(
        bob.get_project(&project_id).await.status().as_u16(),
        403
    );
    let request_id = submit_request(&bob, &project_id).await;

    // Alice approves; Bob is a MEMBER now.
    let response = alice
        .post_approve_request(&json!({
            "projectId": project_id,
            "requestId": request_id
        }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    // Alice sets up a task for the project.
    let response = alice
        .post_new_task(&json!({
            "projectId": project_id,
            "name": "Paint the fence",
            "label": "FEATURE",
            "priority": "MEDIUM"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 201);
    let body = get_json_response_body(response).await;
    let task_id = body.get("taskId").unwrap().as_str().unwrap().to_owned();

    // MEMBER is not enough to delete tasks.
    assert_eq!(
        bob.delete_task(&project_id, &task_id)
            .await
            .status()
            .as_u16(),
        403
    );

    // Alice promotes Bob to ADMIN; now he can.
    promote_to_admin(&alice, &project_id, &bob.user_id).await;
    assert_eq!(
        bob.delete_task(&project_id, &task_id)
            .await
            .status()
            .as_u16(),
        200
    );

    // But only the OWNER may delete the project itself.
    assert_eq!(
        bob.delete_project(&project_id).await.status().as_u16(),
        403
    );

    let member_id = member_id_of(&alice, &project_id, &bob.user_id).await;
    assert!(!member_id.is_empty());
}
