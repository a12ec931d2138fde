//! Policy evaluation.
//!
//! - No IO
//! - No panics
//! - Pure function of (route table, current identity, request)

use tracing::debug;

use navguard_session::{Identity, SessionState};

use crate::decision::Decision;
use crate::request::NavigationRequest;
use crate::route::Visibility;
use crate::table::{RouteTable, UnmatchedPolicy};

/// The navigation policy engine.
///
/// Wraps a validated [`RouteTable`] and decides, for each navigation
/// request, whether to proceed or where to redirect. The table's startup
/// validation guarantees that any redirect this engine produces evaluates
/// to `Proceed` under the same identity, so redirect recursion terminates
/// after one hop.
#[derive(Debug, Clone)]
pub struct PolicyEngine {
    table: RouteTable,
}

impl PolicyEngine {
    pub fn new(table: RouteTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Evaluate one navigation request against the current identity.
    ///
    /// Total and deterministic: every input yields exactly one [`Decision`].
    pub fn evaluate(&self, identity: Option<&Identity>, request: &NavigationRequest) -> Decision {
        let decision = self.decide(identity, request);
        debug!(
            target_path = %request.target,
            origin = request.origin.as_deref(),
            decision = %decision,
            "navigation evaluated"
        );
        decision
    }

    /// Convenience over [`evaluate`](Self::evaluate) reading the identity
    /// snapshot from session state.
    pub fn evaluate_session(&self, session: &SessionState, request: &NavigationRequest) -> Decision {
        self.evaluate(session.current().as_ref(), request)
    }

    fn decide(&self, identity: Option<&Identity>, request: &NavigationRequest) -> Decision {
        let Some((policy, _params)) = self.table.resolve(&request.target) else {
            return match self.table.unmatched() {
                UnmatchedPolicy::NotFound => Decision::NotFound,
                // Unknown targets require authentication with no role
                // restriction.
                UnmatchedPolicy::RequireAuth => match identity {
                    None => Decision::Redirect(self.table.default_public_landing().to_string()),
                    Some(_) => Decision::Proceed,
                },
            };
        };

        match policy.visibility {
            Visibility::Public => Decision::Proceed,
            Visibility::RequiresAuth => match identity {
                None => Decision::Redirect(self.table.default_public_landing().to_string()),
                Some(identity) if policy.permits(identity.role) => Decision::Proceed,
                Some(identity) => {
                    Decision::Redirect(self.table.home_for_role(identity.role).to_string())
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use navguard_core::{Role, SubjectId};

    use crate::route::{RoutePolicy, Visibility};
    use crate::table::{RoleHomes, RouteTableConfig};

    fn route(name: &str, path: &str, visibility: Visibility, roles: &[Role]) -> RoutePolicy {
        RoutePolicy {
            name: name.to_string(),
            path: path.parse().unwrap(),
            visibility,
            allowed_roles: roles.iter().copied().collect(),
        }
    }

    fn config(unmatched: UnmatchedPolicy) -> RouteTableConfig {
        RouteTableConfig {
            routes: vec![
                route("Home", "/", Visibility::Public, &[]),
                route("Login", "/login", Visibility::Public, &[]),
                route(
                    "UserHome",
                    "/userhome",
                    Visibility::RequiresAuth,
                    &[Role::Beneficiary, Role::Caregiver],
                ),
                route(
                    "VolunteerHome",
                    "/volunteerhome",
                    Visibility::RequiresAuth,
                    &[Role::Volunteer],
                ),
                route("StaffHome", "/staffhome", Visibility::RequiresAuth, &[Role::Staff]),
                route(
                    "Profile",
                    "/profile",
                    Visibility::RequiresAuth,
                    &[Role::Beneficiary, Role::Caregiver, Role::Volunteer, Role::Staff],
                ),
                route("ViewEvent", "/viewevent/:id", Visibility::RequiresAuth, &[]),
            ],
            default_public_landing: "/".to_string(),
            role_homes: RoleHomes {
                beneficiary: "/userhome".to_string(),
                caregiver: "/userhome".to_string(),
                volunteer: "/volunteerhome".to_string(),
                staff: "/staffhome".to_string(),
            },
            unmatched,
        }
    }

    fn engine() -> PolicyEngine {
        PolicyEngine::new(RouteTable::new(config(UnmatchedPolicy::RequireAuth)).unwrap())
    }

    fn identity(role: Role) -> Identity {
        Identity::new(SubjectId::new("uid-t"), "Test", role)
    }

    #[test]
    fn public_routes_proceed_for_any_identity() {
        let engine = engine();
        let request = NavigationRequest::new("/login");

        assert_eq!(engine.evaluate(None, &request), Decision::Proceed);
        for role in Role::ALL {
            assert_eq!(
                engine.evaluate(Some(&identity(role)), &request),
                Decision::Proceed
            );
        }
    }

    #[test]
    fn unauthenticated_gated_route_redirects_to_landing() {
        let engine = engine();
        let decision = engine.evaluate(None, &NavigationRequest::new("/profile"));
        assert_eq!(decision, Decision::Redirect("/".to_string()));

        // The landing itself proceeds: no redirect loop.
        assert_eq!(
            engine.evaluate(None, &NavigationRequest::new("/")),
            Decision::Proceed
        );
    }

    #[test]
    fn excluded_role_redirects_to_its_home() {
        let engine = engine();
        let volunteer = identity(Role::Volunteer);

        let decision = engine.evaluate(Some(&volunteer), &NavigationRequest::new("/staffhome"));
        assert_eq!(decision, Decision::Redirect("/volunteerhome".to_string()));

        // Re-evaluating the home with the same identity proceeds.
        assert_eq!(
            engine.evaluate(Some(&volunteer), &NavigationRequest::new("/volunteerhome")),
            Decision::Proceed
        );
    }

    #[test]
    fn every_excluded_role_home_terminates() {
        let engine = engine();
        for role in Role::ALL {
            let who = identity(role);
            for route in engine.table().routes() {
                let request = NavigationRequest::new(route.path.as_str());
                if let Decision::Redirect(destination) = engine.evaluate(Some(&who), &request) {
                    assert_eq!(
                        engine.evaluate(Some(&who), &NavigationRequest::new(destination)),
                        Decision::Proceed
                    );
                }
            }
        }
    }

    #[test]
    fn staff_may_view_profile_when_all_roles_allowed() {
        let engine = engine();
        let staff = identity(Role::Staff);
        assert_eq!(
            engine.evaluate(Some(&staff), &NavigationRequest::new("/profile")),
            Decision::Proceed
        );
    }

    #[test]
    fn empty_role_set_admits_any_authenticated_role() {
        let engine = engine();
        for role in Role::ALL {
            assert_eq!(
                engine.evaluate(Some(&identity(role)), &NavigationRequest::new("/viewevent/3")),
                Decision::Proceed
            );
        }
        assert_eq!(
            engine.evaluate(None, &NavigationRequest::new("/viewevent/3")),
            Decision::Redirect("/".to_string())
        );
    }

    #[test]
    fn unmatched_target_requires_auth_by_default() {
        let engine = engine();
        assert_eq!(
            engine.evaluate(None, &NavigationRequest::new("/no-such-view")),
            Decision::Redirect("/".to_string())
        );
        assert_eq!(
            engine.evaluate(Some(&identity(Role::Staff)), &NavigationRequest::new("/no-such-view")),
            Decision::Proceed
        );
    }

    #[test]
    fn unmatched_target_as_not_found_when_configured() {
        let table = RouteTable::new(config(UnmatchedPolicy::NotFound)).unwrap();
        let engine = PolicyEngine::new(table);

        assert_eq!(
            engine.evaluate(None, &NavigationRequest::new("/no-such-view")),
            Decision::NotFound
        );
        assert_eq!(
            engine.evaluate(Some(&identity(Role::Staff)), &NavigationRequest::new("/no-such-view")),
            Decision::NotFound
        );
    }

    #[test]
    fn evaluation_reads_the_session_snapshot() {
        let engine = engine();
        let session = SessionState::new();
        let request = NavigationRequest::new("/staffhome");

        assert_eq!(
            engine.evaluate_session(&session, &request),
            Decision::Redirect("/".to_string())
        );

        session.sign_in(identity(Role::Staff));
        assert_eq!(engine.evaluate_session(&session, &request), Decision::Proceed);

        session.sign_out();
        assert_eq!(
            engine.evaluate_session(&session, &request),
            Decision::Redirect("/".to_string())
        );
    }

    #[test]
    fn origin_does_not_influence_the_decision() {
        let engine = engine();
        let volunteer = identity(Role::Volunteer);

        let fresh = engine.evaluate(Some(&volunteer), &NavigationRequest::new("/staffhome"));
        let from_login = engine.evaluate(
            Some(&volunteer),
            &NavigationRequest::with_origin("/staffhome", "/login"),
        );
        assert_eq!(fresh, from_login);
    }

    #[test]
    fn redirect_destination_depends_only_on_role() {
        let engine = engine();
        let a = Identity::new(SubjectId::new("uid-a"), "A", Role::Caregiver);
        let b = Identity::new(SubjectId::new("uid-b"), "B", Role::Caregiver);

        let request = NavigationRequest::new("/staffhome");
        assert_eq!(
            engine.evaluate(Some(&a), &request),
            engine.evaluate(Some(&b), &request)
        );
        assert_eq!(
            engine.evaluate(Some(&a), &request),
            Decision::Redirect("/userhome".to_string())
        );
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn any_identity() -> impl Strategy<Value = Option<Identity>> {
            proptest::option::of(
                proptest::sample::select(Role::ALL.to_vec()).prop_map(identity),
            )
        }

        fn any_target() -> impl Strategy<Value = String> {
            prop_oneof![
                proptest::sample::select(vec![
                    "/".to_string(),
                    "/login".to_string(),
                    "/userhome".to_string(),
                    "/volunteerhome".to_string(),
                    "/staffhome".to_string(),
                    "/profile".to_string(),
                    "/viewevent/12".to_string(),
                ]),
                "/[a-z]{1,12}",
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: evaluation is idempotent (same request + identity
            /// = same decision).
            #[test]
            fn evaluate_is_idempotent(identity in any_identity(), target in any_target()) {
                let engine = engine();
                let request = NavigationRequest::new(target);

                let first = engine.evaluate(identity.as_ref(), &request);
                let second = engine.evaluate(identity.as_ref(), &request);
                prop_assert_eq!(first, second);
            }

            /// Property: any redirect the engine produces evaluates to
            /// `Proceed` under the same identity, so redirect recursion
            /// terminates after one hop.
            #[test]
            fn redirects_terminate(identity in any_identity(), target in any_target()) {
                let engine = engine();
                let decision = engine.evaluate(identity.as_ref(), &NavigationRequest::new(target));

                if let Decision::Redirect(destination) = decision {
                    let follow_up = engine.evaluate(
                        identity.as_ref(),
                        &NavigationRequest::new(destination),
                    );
                    prop_assert_eq!(follow_up, Decision::Proceed);
                }
            }

            /// Property: public routes proceed for any identity, including
            /// none.
            #[test]
            fn public_always_proceeds(identity in any_identity()) {
                let engine = engine();
                for path in ["/", "/login"] {
                    let decision = engine.evaluate(identity.as_ref(), &NavigationRequest::new(path));
                    prop_assert_eq!(decision, Decision::Proceed);
                }
            }
        }
    }
}
