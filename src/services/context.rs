use crate::middleware::auth::AuthUserInfo;
use crate::workflow::Actor;

#[derive(Clone, Debug)]
pub struct RequestContext {
    pub actor: Actor,
}

impl RequestContext {
    pub fn user_id(&self) -> i32 {
        self.actor.user_id
    }
}

impl From<&AuthUserInfo> for RequestContext {
    fn from(auth_info: &AuthUserInfo) -> Self {
        Self {
            actor: auth_info.actor.clone(),
        }
    }
}
