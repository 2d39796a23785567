use crate::helpers::{
    add_new_project, get_json_response_body, join_via_invitation,
    member_id_of, promote_to_admin, TestApp, TestUser,
};
use serde_json::json;
use test_context::test_context;

/// Owner + two plain members, one of which is then promoted to ADMIN.
async fn project_with_crew(
    app: &TestApp,
) -> (TestUser, TestUser, TestUser, String) {
    let owner = app.signed_in_user().await;
    let admin = app.signed_in_user().await;
    let member = app.signed_in_user().await;

    let project_id = add_new_project(&owner, "Craggy Island", false).await;
    join_via_invitation(&owner, &admin, &project_id).await;
    join_via_invitation(&owner, &member, &project_id).await;
    promote_to_admin(&owner, &project_id, &admin.user_id).await;

    (owner, admin, member, project_id)
}

#[test_context(TestApp)]
#[tokio::test]
async fn admin_can_move_members_between_member_and_admin(app: &mut TestApp) {
    let (owner, admin, member, project_id) = project_with_crew(app).await;

    let member_member_id =
        member_id_of(&owner, &project_id, &member.user_id).await;

    let response = admin
        .put_update_member_role(&json!({
            "projectId": project_id,
            "memberId": member_member_id,
            "role": "ADMIN"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let body = get_json_response_body(response).await;
    assert_eq!(body.get("role").unwrap(), "ADMIN");

    // And back down again.
    let response = admin
        .put_update_member_role(&json!({
            "projectId": project_id,
            "memberId": member_member_id,
            "role": "MEMBER"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 200);
}

#[test_context(TestApp)]
#[tokio::test]
async fn nobody_can_promote_to_owner(app: &mut TestApp) {
    let (owner, admin, member, project_id) = project_with_crew(app).await;

    let member_member_id =
        member_id_of(&owner, &project_id, &member.user_id).await;

    for actor in [&owner, &admin] {
        let response = actor
            .put_update_member_role(&json!({
                "projectId": project_id,
                "memberId": member_member_id,
                "role": "OWNER"
            }))
            .await;
        assert_eq!(
            response.status().as_u16(),
            403,
            "Promoting to OWNER must be rejected"
        );
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn owner_role_cannot_be_changed(app: &mut TestApp) {
    let (owner, admin, _member, project_id) = project_with_crew(app).await;

    let owner_member_id =
        member_id_of(&owner, &project_id, &owner.user_id).await;

    let response = admin
        .put_update_member_role(&json!({
            "projectId": project_id,
            "memberId": owner_member_id,
            "role": "MEMBER"
        }))
        .await;
    assert_eq!(
        response.status().as_u16(),
        403,
        "The OWNER's role must be immutable"
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn member_cannot_change_roles(app: &mut TestApp) {
    let (owner, admin, member, project_id) = project_with_crew(app).await;

    let admin_member_id =
        member_id_of(&owner, &project_id, &admin.user_id).await;

    let response = member
        .put_update_member_role(&json!({
            "projectId": project_id,
            "memberId": admin_member_id,
            "role": "MEMBER"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 403);
}

#[test_context(TestApp)]
#[tokio::test]
async fn update_role_returns_404_for_unknown_member(app: &mut TestApp) {
    let (owner, _admin, _member, project_id) = project_with_crew(app).await;

    let response = owner
        .put_update_member_role(&json!({
            "projectId": project_id,
            "memberId": "be9915f0-a4c2-48fb-977b-9f4f959c5729",
            "role": "ADMIN"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 404);
}

#[test_context(TestApp)]
#[tokio::test]
async fn owner_can_remove_any_non_owner(app: &mut TestApp) {
    let (owner, admin, member, project_id) = project_with_crew(app).await;

    for target in [&admin, &member] {
        let target_member_id =
            member_id_of(&owner, &project_id, &target.user_id).await;
        let response = owner
            .delete_remove_member(&project_id, &target_member_id)
            .await;
        assert_eq!(response.status().as_u16(), 200);

        assert_eq!(
            target.get_project(&project_id).await.status().as_u16(),
            403,
            "Removed members lose access to the private project"
        );
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn admin_can_remove_members_but_not_admins(app: &mut TestApp) {
    let (owner, admin, member, project_id) = project_with_crew(app).await;

    let second_admin = app.signed_in_user().await;
    join_via_invitation(&owner, &second_admin, &project_id).await;
    promote_to_admin(&owner, &project_id, &second_admin.user_id).await;

    let member_member_id =
        member_id_of(&owner, &project_id, &member.user_id).await;
    let response = admin
        .delete_remove_member(&project_id, &member_member_id)
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let second_admin_member_id =
        member_id_of(&owner, &project_id, &second_admin.user_id).await;
    let response = admin
        .delete_remove_member(&project_id, &second_admin_member_id)
        .await;
    assert_eq!(
        response.status().as_u16(),
        403,
        "ADMIN must not remove another ADMIN"
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn owner_is_never_removable(app: &mut TestApp) {
    let (owner, admin, member, project_id) = project_with_crew(app).await;

    let owner_member_id =
        member_id_of(&owner, &project_id, &owner.user_id).await;

    for actor in [&admin, &member] {
        let response = actor
            .delete_remove_member(&project_id, &owner_member_id)
            .await;
        assert_eq!(
            response.status().as_u16(),
            403,
            "Removing the OWNER must always be rejected"
        );
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn members_cannot_remove_anyone(app: &mut TestApp) {
    let (owner, admin, member, project_id) = project_with_crew(app).await;

    let admin_member_id =
        member_id_of(&owner, &project_id, &admin.user_id).await;

    let response = member
        .delete_remove_member(&project_id, &admin_member_id)
        .await;
    assert_eq!(response.status().as_u16(), 403);
}

#[test_context(TestApp)]
#[tokio::test]
async fn self_removal_is_rejected(app: &mut TestApp) {
    let (owner, admin, _member, project_id) = project_with_crew(app).await;

    let admin_member_id =
        member_id_of(&owner, &project_id, &admin.user_id).await;

    let response = admin
        .delete_remove_member(&project_id, &admin_member_id)
        .await;
    assert_eq!(
        response.status().as_u16(),
        403,
        "Self-removal must go through the leave flow"
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn member_list_is_hidden_from_outsiders_on_private_projects(
    app: &mut TestApp,
) {
    let (owner, _admin, _member, project_id) = project_with_crew(app).await;

    let outsider = app.signed_in_user().await;
    assert_eq!(
        outsider.get_members(&project_id).await.status().as_u16(),
        403
    );

    let response = owner.get_members(&project_id).await;
    assert_eq!(response.status().as_u16(), 200);
    let body = get_json_response_body(response).await;
    assert_eq!(
        body.get("members").unwrap().as_array().unwrap().len(),
        3
    );
}
