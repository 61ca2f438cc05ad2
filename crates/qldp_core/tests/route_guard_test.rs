use qldp_core::route::{Guard, PrivateRoute, RoleRoute, RouteGuard};
use qldp_core::{
    AccessDenied, AuthSession, Location, LoginSuccess, Page, Resolution, Role, RouteTable,
    RouterConfig,
};

fn side_nav() -> RouteTable {
    RouteTable::side_nav(RouterConfig::default()).expect("side nav routes build")
}

fn signed_in(roles: &[Role]) -> AuthSession {
    AuthSession::signed_in(&LoginSuccess::new("tester", roles.iter().copied()))
}

fn rendered(table: &RouteTable, path: &str, session: &AuthSession) -> Option<Page> {
    match table.resolve(&Location::parse(path), session) {
        Resolution::Render { page, .. } => Some(page),
        Resolution::Redirect { .. } => None,
    }
}

#[test]
fn side_nav_has_five_exact_routes_in_order() {
    let table = side_nav();
    let rows: Vec<(&str, bool, Option<Role>, Page)> = table
        .entries()
        .iter()
        .map(|entry| {
            (
                entry.pattern.as_str(),
                entry.exact,
                entry.guard.required_role(),
                entry.page,
            )
        })
        .collect();
    assert_eq!(
        rows,
        vec![
            ("/account", true, None, Page::Account),
            ("/users/list", true, Some(Role::Admin), Page::Admin),
            ("/people/list", true, Some(Role::Manager), Page::People),
            ("/people/add", true, Some(Role::Manager), Page::AddPerson),
            ("/people/:id", true, Some(Role::Manager), Page::PersonDetail),
        ]
    );
}

#[test]
fn admin_reaches_users_but_not_people() {
    let table = side_nav();
    let admin = signed_in(&[Role::Admin]);
    assert_eq!(rendered(&table, "/users/list", &admin), Some(Page::Admin));
    assert_eq!(rendered(&table, "/people/list", &admin), None);
    assert_eq!(rendered(&table, "/account", &admin), Some(Page::Account));
}

#[test]
fn manager_reaches_people_pages() {
    let table = side_nav();
    let manager = signed_in(&[Role::Manager]);
    assert_eq!(rendered(&table, "/people/list", &manager), Some(Page::People));
    assert_eq!(rendered(&table, "/people/add/", &manager), Some(Page::AddPerson));
    assert_eq!(rendered(&table, "/people/41", &manager), Some(Page::PersonDetail));
    assert_eq!(rendered(&table, "/users/list", &manager), None);
}

#[test]
fn session_with_both_roles_reaches_everything() {
    let table = side_nav();
    let both = signed_in(&[Role::Admin, Role::Manager]);
    for path in ["/account", "/users/list", "/people/list", "/people/add", "/people/1"] {
        assert!(rendered(&table, path, &both).is_some(), "{path} should render");
    }
}

#[test]
fn exact_routes_do_not_match_deeper_paths() {
    let table = side_nav();
    let manager = signed_in(&[Role::Manager]);
    assert_eq!(rendered(&table, "/people/1/edit", &manager), None);
    assert_eq!(rendered(&table, "/account/settings", &manager), None);
}

#[test]
fn guards_report_the_denial_reason() {
    let signed_out = AuthSession::default();
    assert_eq!(
        PrivateRoute.check(&signed_out),
        Err(AccessDenied::Unauthenticated)
    );
    let guard = Guard::Role(RoleRoute::new(Role::Admin));
    assert_eq!(
        guard.check(&signed_in(&[Role::Employee])),
        Err(AccessDenied::MissingRole {
            required: Role::Admin
        })
    );
    assert_eq!(guard.label(), "role");
}
