use crate::error::NuntiusError;
use actix_web::HttpRequest;
use nuntius_scheduler_infra::NuntiusContext;

pub const OWNER_HEADER: &str = "nuntius-owner";
pub const API_KEY_HEADER: &str = "x-api-key";
const ADMIN_OWNER_ID: &str = "admin";

/// The tenant a request is made on behalf of
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    pub id: String,
    /// Admins see and modify the data of every owner
    pub is_admin: bool,
}

impl Owner {
    pub fn can_access(&self, owner_id: &str) -> bool {
        self.is_admin || self.id == owner_id
    }
}

fn get_header<'a>(req: &'a HttpRequest, name: &str) -> Result<Option<&'a str>, NuntiusError> {
    match req.headers().get(name) {
        Some(value) => match value.to_str() {
            Ok(value) if !value.trim().is_empty() => Ok(Some(value.trim())),
            Ok(_) => Ok(None),
            Err(_) => Err(NuntiusError::UnidentifiableClient(format!(
                "Malformed {} header provided: {:?}",
                name, value
            ))),
        },
        None => Ok(None),
    }
}

/// Identifies the owner of a request.
///
/// The `nuntius-owner` header is set by the session layer in front of the
/// service. A valid admin key in `x-api-key` grants admin access, optionally
/// acting as the owner given in `nuntius-owner`.
pub fn protect_route(req: &HttpRequest, ctx: &NuntiusContext) -> Result<Owner, NuntiusError> {
    let owner = get_header(req, OWNER_HEADER)?;

    if let Some(api_key) = get_header(req, API_KEY_HEADER)? {
        if api_key != ctx.config.admin_api_key {
            return Err(NuntiusError::Unauthorized("Invalid api key provided".into()));
        }
        return Ok(Owner {
            id: owner.unwrap_or(ADMIN_OWNER_ID).to_string(),
            is_admin: true,
        });
    }

    match owner {
        Some(owner) => Ok(Owner {
            id: owner.to_string(),
            is_admin: false,
        }),
        None => Err(NuntiusError::UnidentifiableClient(format!(
            "Missing the {} header",
            OWNER_HEADER
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn ctx() -> NuntiusContext {
        let mut ctx = NuntiusContext::create_inmemory();
        ctx.config.admin_api_key = "admin-key".into();
        ctx
    }

    #[test]
    fn owner_header_identifies_tenant() {
        let req = TestRequest::default()
            .insert_header((OWNER_HEADER, "user-1"))
            .to_http_request();
        let owner = protect_route(&req, &ctx()).unwrap();
        assert_eq!(owner.id, "user-1");
        assert!(!owner.is_admin);
        assert!(owner.can_access("user-1"));
        assert!(!owner.can_access("user-2"));
    }

    #[test]
    fn admin_key_grants_access_to_everything() {
        let req = TestRequest::default()
            .insert_header((API_KEY_HEADER, "admin-key"))
            .to_http_request();
        let owner = protect_route(&req, &ctx()).unwrap();
        assert!(owner.is_admin);
        assert_eq!(owner.id, ADMIN_OWNER_ID);
        assert!(owner.can_access("user-2"));

        let req = TestRequest::default()
            .insert_header((API_KEY_HEADER, "admin-key"))
            .insert_header((OWNER_HEADER, "user-1"))
            .to_http_request();
        assert_eq!(protect_route(&req, &ctx()).unwrap().id, "user-1");
    }

    #[test]
    fn rejects_unknown_clients() {
        let req = TestRequest::default().to_http_request();
        assert!(matches!(
            protect_route(&req, &ctx()),
            Err(NuntiusError::UnidentifiableClient(_))
        ));

        let req = TestRequest::default()
            .insert_header((OWNER_HEADER, "user-1"))
            .insert_header((API_KEY_HEADER, "guess"))
            .to_http_request();
        assert!(matches!(
            protect_route(&req, &ctx()),
            Err(NuntiusError::Unauthorized(_))
        ));
    }
}
