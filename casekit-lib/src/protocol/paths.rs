//! Canonical endpoint paths for the manufacturer API.
//!
//! Every client must build identical paths; the vendor routes on the exact
//! string and returns an unhelpful 404 for near-misses.

/// Path prefix for all mobile-shell endpoints.
pub const API_PREFIX: &str = "/mobileShell/en";

/// The manufacturer endpoints this library signs requests for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Authenticate and obtain a bearer token.
    UserLogin,
    /// List phone brands available on a machine.
    BrandList,
    /// List case stock for a brand/machine pair.
    StockList,
    /// Submit a payment request (carries a fresh `PYEN` token).
    OrderPayData,
    /// Report/advance payment status.
    OrderPayStatus,
    /// Create the print order (links back via `third_pay_id`).
    OrderOrderData,
    /// Poll payment status.
    OrderGetPayStatus,
    /// Poll order/print status.
    OrderGetOrderStatus,
    /// List queued print jobs for a machine.
    OrderPrintList,
    /// Upload the rendered case design image.
    FileUpload,
}

impl Endpoint {
    /// Path relative to [`API_PREFIX`].
    pub fn path(&self) -> &'static str {
        match self {
            Self::UserLogin => "user/login",
            Self::BrandList => "brand/list",
            Self::StockList => "stock/list",
            Self::OrderPayData => "order/payData",
            Self::OrderPayStatus => "order/payStatus",
            Self::OrderOrderData => "order/orderData",
            Self::OrderGetPayStatus => "order/getPayStatus",
            Self::OrderGetOrderStatus => "order/getOrderStatus",
            Self::OrderPrintList => "order/printList",
            Self::FileUpload => "file/upload",
        }
    }

    /// Full request path including the prefix.
    pub fn full_path(&self) -> String {
        format!("{}/{}", API_PREFIX, self.path())
    }

    /// Whether the endpoint requires an `Authorization` bearer token on top
    /// of the signature.
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::UserLogin)
    }

    /// All known endpoints, in rough call order of a vending flow.
    pub fn all() -> &'static [Endpoint] {
        &[
            Self::UserLogin,
            Self::BrandList,
            Self::StockList,
            Self::OrderPayData,
            Self::OrderPayStatus,
            Self::OrderOrderData,
            Self::OrderGetPayStatus,
            Self::OrderGetOrderStatus,
            Self::OrderPrintList,
            Self::FileUpload,
        ]
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.full_path())
    }
}

/// Build the absolute URL for an endpoint against a configured base.
pub fn endpoint_url(base_url: &str, endpoint: Endpoint) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), endpoint.full_path())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_carry_the_prefix() {
        assert_eq!(Endpoint::UserLogin.full_path(), "/mobileShell/en/user/login");
        assert_eq!(
            Endpoint::OrderGetPayStatus.full_path(),
            "/mobileShell/en/order/getPayStatus"
        );
    }

    #[test]
    fn url_builder_tolerates_trailing_slash() {
        assert_eq!(
            endpoint_url("https://vendor.example/", Endpoint::BrandList),
            "https://vendor.example/mobileShell/en/brand/list"
        );
        assert_eq!(
            endpoint_url("https://vendor.example", Endpoint::BrandList),
            "https://vendor.example/mobileShell/en/brand/list"
        );
    }

    #[test]
    fn only_login_skips_auth() {
        for endpoint in Endpoint::all() {
            assert_eq!(
                endpoint.requires_auth(),
                *endpoint != Endpoint::UserLogin,
                "{}",
                endpoint
            );
        }
    }

    #[test]
    fn catalogue_is_complete_and_distinct() {
        let all = Endpoint::all();
        assert_eq!(all.len(), 10);
        let paths: std::collections::HashSet<_> = all.iter().map(|e| e.path()).collect();
        assert_eq!(paths.len(), all.len());
    }
}
