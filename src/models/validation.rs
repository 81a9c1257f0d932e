use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::{
    CreateOrderRequest, CreateProductRequest, CreateUserRequest, PaymentRequest, ResourceId,
    SchemaViolation, ValidationError, ValidationResult, DEFAULT_CURRENCY,
};

/// A request payload that can be built from a raw HTTP body.
///
/// Every create endpoint goes through this trait, whether the payload is
/// checked by hand (products, payments) or by a declared schema (users,
/// orders), so handlers see one error taxonomy.
pub trait RequestModel: Sized {
    fn from_request_body(content_type: Option<&str>, body: &[u8]) -> ValidationResult<Self>;
}

/// Validation messages
pub const REQUEST_MUST_BE_JSON: &str = "Request must be JSON";
pub const MISSING_REQUIRED_FIELDS: &str = "Missing required fields";
pub const AMOUNT_IS_REQUIRED: &str = "Amount is required";
pub const INVALID_PRICE_VALUE: &str = "Invalid price value";
pub const INVALID_NAME_VALUE: &str = "Invalid name value";
pub const INVALID_STOCK_VALUE: &str = "Invalid stock value";

const PRODUCT_REQUIRED_FIELDS: [&str; 2] = ["name", "price"];

impl RequestModel for CreateProductRequest {
    fn from_request_body(content_type: Option<&str>, body: &[u8]) -> ValidationResult<Self> {
        let data = parse_json_object(content_type, body)?;
        require_fields(&data, &PRODUCT_REQUIRED_FIELDS, MISSING_REQUIRED_FIELDS)?;

        let name = data
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| invalid_field(INVALID_NAME_VALUE))?;
        let price = data
            .get("price")
            .ok_or_else(|| missing_field(MISSING_REQUIRED_FIELDS))
            .and_then(coerce_price)?;
        let stock = coerce_stock(data.get("stock"))?;

        Ok(CreateProductRequest { name, price, stock })
    }
}

impl RequestModel for PaymentRequest {
    fn from_request_body(content_type: Option<&str>, body: &[u8]) -> ValidationResult<Self> {
        let mut data = parse_json_object(content_type, body)?;

        let amount = data
            .remove("amount")
            .ok_or_else(|| missing_field(AMOUNT_IS_REQUIRED))?;
        let currency = data
            .remove("currency")
            .unwrap_or_else(|| Value::String(DEFAULT_CURRENCY.to_string()));

        Ok(PaymentRequest { amount, currency })
    }
}

impl RequestModel for CreateUserRequest {
    fn from_request_body(content_type: Option<&str>, body: &[u8]) -> ValidationResult<Self> {
        validate_schema(content_type, body)
    }
}

impl RequestModel for CreateOrderRequest {
    fn from_request_body(content_type: Option<&str>, body: &[u8]) -> ValidationResult<Self> {
        validate_schema(content_type, body)
    }
}

impl Schema for CreateUserRequest {
    const FIELDS: &'static [FieldSpec] = &[FieldSpec::string("name"), FieldSpec::string("email")];
}

impl Schema for CreateOrderRequest {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::integer("user_id"),
        FieldSpec::integer("product_id"),
        FieldSpec::integer("quantity"),
    ];
}

// =============================================================================
// MANUAL VALIDATION
// =============================================================================

/// Whether a Content-Type header denotes a JSON body
pub fn is_json_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// Parse a JSON object body, rejecting anything that is not declared and
/// encoded as a JSON object
pub fn parse_json_object(
    content_type: Option<&str>,
    body: &[u8],
) -> ValidationResult<Map<String, Value>> {
    if !content_type.map(is_json_content_type).unwrap_or(false) {
        return Err(invalid_format());
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(invalid_format()),
    }
}

/// Ensure every listed field is present (null counts as present)
pub fn require_fields(
    data: &Map<String, Value>,
    fields: &[&str],
    message: &str,
) -> ValidationResult<()> {
    if fields.iter().all(|field| data.contains_key(*field)) {
        Ok(())
    } else {
        Err(missing_field(message))
    }
}

/// Coerce a price to a finite, non-negative float. Numbers and numeric
/// strings are accepted.
pub fn coerce_price(value: &Value) -> ValidationResult<f64> {
    let price = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    match price {
        Some(price) if price.is_finite() && price >= 0.0 => Ok(price),
        _ => Err(invalid_field(INVALID_PRICE_VALUE)),
    }
}

/// Coerce an optional stock level; absent means 0
pub fn coerce_stock(value: Option<&Value>) -> ValidationResult<u64> {
    let Some(value) = value else {
        return Ok(0);
    };

    let stock = match value {
        Value::Number(number) => number.as_u64().or_else(|| {
            number
                .as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }),
        _ => None,
    };

    stock.ok_or_else(|| invalid_field(INVALID_STOCK_VALUE))
}

/// Parse a product route id; anything but a non-negative integer does not
/// name a product
pub fn parse_route_id(raw: &str) -> Option<ResourceId> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// Parse a schema-typed path id. Non-integers are schema violations,
/// negative integers can never match a record and yield `None`.
pub fn parse_path_id(raw: &str, param: &str) -> ValidationResult<Option<ResourceId>> {
    let value = raw.trim().parse::<i64>().map_err(|_| ValidationError::Schema {
        violations: vec![SchemaViolation::new(
            &["path", param],
            "value is not a valid integer",
            "type_error.integer",
        )],
    })?;

    Ok(ResourceId::try_from(value).ok())
}

fn invalid_format() -> ValidationError {
    ValidationError::InvalidRequestFormat {
        message: REQUEST_MUST_BE_JSON.to_string(),
    }
}

fn missing_field(message: &str) -> ValidationError {
    ValidationError::MissingField {
        message: message.to_string(),
    }
}

fn invalid_field(message: &str) -> ValidationError {
    ValidationError::InvalidFieldValue {
        message: message.to_string(),
    }
}

// =============================================================================
// SCHEMA VALIDATION
// =============================================================================

/// Primitive type of a schema field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
}

/// A required, typed field of a schema model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn string(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::String,
        }
    }

    pub const fn integer(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Integer,
        }
    }
}

/// A payload described by a list of required typed fields
pub trait Schema: DeserializeOwned {
    const FIELDS: &'static [FieldSpec];
}

/// Validate a body against `T`'s schema, collecting every violation before
/// failing. Unknown fields are ignored.
///
/// A body without a Content-Type is decoded as JSON. A body declared with a
/// non-JSON type is never decoded and cannot be a dict.
pub fn validate_schema<T: Schema>(content_type: Option<&str>, body: &[u8]) -> ValidationResult<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(schema_error(vec![SchemaViolation::new(
            &["body"],
            "field required",
            "value_error.missing",
        )]));
    }

    if content_type.is_some_and(|declared| !is_json_content_type(declared)) {
        return Err(not_a_dict());
    }

    let value: Value = serde_json::from_slice(body).map_err(|e| {
        let column = e.column().to_string();
        schema_error(vec![SchemaViolation::new(
            &["body", column.as_str()],
            "JSON decode error",
            "value_error.jsondecode",
        )])
    })?;

    let Value::Object(data) = value else {
        return Err(not_a_dict());
    };

    let mut coerced = Map::with_capacity(T::FIELDS.len());
    let mut violations = Vec::new();

    for spec in T::FIELDS {
        match data.get(spec.name) {
            None => violations.push(SchemaViolation::missing("body", spec.name)),
            Some(raw) => match coerce_field(spec, raw) {
                Ok(value) => {
                    coerced.insert(spec.name.to_string(), value);
                }
                Err(violation) => violations.push(violation),
            },
        }
    }

    if !violations.is_empty() {
        return Err(schema_error(violations));
    }

    serde_json::from_value(Value::Object(coerced)).map_err(|e| {
        schema_error(vec![SchemaViolation::new(
            &["body"],
            e.to_string(),
            "value_error",
        )])
    })
}

fn not_a_dict() -> ValidationError {
    schema_error(vec![SchemaViolation::new(
        &["body"],
        "value is not a valid dict",
        "type_error.dict",
    )])
}

fn coerce_field(spec: &FieldSpec, raw: &Value) -> Result<Value, SchemaViolation> {
    match spec.kind {
        FieldKind::String => match raw {
            Value::String(_) => Ok(raw.clone()),
            Value::Number(number) => Ok(Value::String(number.to_string())),
            _ => Err(SchemaViolation::new(
                &["body", spec.name],
                "str type expected",
                "type_error.str",
            )),
        },
        FieldKind::Integer => {
            let integer = match raw {
                Value::Number(number) => number.as_i64().or_else(|| {
                    number
                        .as_f64()
                        .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                        .map(|f| f as i64)
                }),
                Value::String(text) => text.trim().parse::<i64>().ok(),
                _ => None,
            };

            integer.map(Value::from).ok_or_else(|| {
                SchemaViolation::new(
                    &["body", spec.name],
                    "value is not a valid integer",
                    "type_error.integer",
                )
            })
        }
    }
}

fn schema_error(violations: Vec<SchemaViolation>) -> ValidationError {
    ValidationError::Schema { violations }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const JSON: Option<&str> = Some("application/json");

    fn body(value: Value) -> Vec<u8> {
        serde_json::to_vec(&value).unwrap()
    }

    fn violations(err: ValidationError) -> Vec<SchemaViolation> {
        match err {
            ValidationError::Schema { violations } => violations,
            other => panic!("Expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_json_content_type_detection() {
        assert!(is_json_content_type("application/json"));
        assert!(is_json_content_type("application/json; charset=utf-8"));
        assert!(is_json_content_type("application/merge-patch+json"));
        assert!(!is_json_content_type("text/plain"));
        assert!(!is_json_content_type("application/x-www-form-urlencoded"));
    }

    #[test]
    fn test_product_request_valid() {
        let request = CreateProductRequest::from_request_body(
            JSON,
            &body(json!({"name": "Tablet", "price": "299.50", "stock": 4})),
        )
        .unwrap();

        assert_eq!(request.name, "Tablet");
        assert_eq!(request.price, 299.5);
        assert_eq!(request.stock, 4);
    }

    #[test]
    fn test_product_request_stock_defaults_to_zero() {
        let request = CreateProductRequest::from_request_body(
            JSON,
            &body(json!({"name": "Mouse", "price": 25})),
        )
        .unwrap();

        assert_eq!(request.stock, 0);
        assert_eq!(request.price, 25.0);
    }

    #[test]
    fn test_product_request_requires_json() {
        let err = CreateProductRequest::from_request_body(
            Some("text/plain"),
            br#"{"name": "Mouse", "price": 25}"#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), REQUEST_MUST_BE_JSON);

        let err = CreateProductRequest::from_request_body(None, b"{}").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidRequestFormat { .. }));

        let err = CreateProductRequest::from_request_body(JSON, b"{not json").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidRequestFormat { .. }));

        let err = CreateProductRequest::from_request_body(JSON, b"[1, 2]").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidRequestFormat { .. }));
    }

    #[test]
    fn test_product_request_missing_fields() {
        let err = CreateProductRequest::from_request_body(JSON, &body(json!({"name": "Mouse"})))
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingField {
                message: MISSING_REQUIRED_FIELDS.to_string()
            }
        );

        let err = CreateProductRequest::from_request_body(JSON, &body(json!({"price": 1})))
            .unwrap_err();
        assert!(matches!(err, ValidationError::MissingField { .. }));
    }

    #[test]
    fn test_product_request_invalid_price() {
        for price in [json!("abc"), json!(null), json!(true), json!(-1.0), json!("inf")] {
            let err = CreateProductRequest::from_request_body(
                JSON,
                &body(json!({"name": "Mouse", "price": price})),
            )
            .unwrap_err();
            assert_eq!(err.to_string(), INVALID_PRICE_VALUE);
        }
    }

    #[test]
    fn test_product_request_invalid_name_and_stock() {
        let err = CreateProductRequest::from_request_body(
            JSON,
            &body(json!({"name": 42, "price": 1.0})),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), INVALID_NAME_VALUE);

        for stock in [json!(-3), json!(1.5), json!("7"), json!(null)] {
            let err = CreateProductRequest::from_request_body(
                JSON,
                &body(json!({"name": "Mouse", "price": 1.0, "stock": stock})),
            )
            .unwrap_err();
            assert_eq!(err.to_string(), INVALID_STOCK_VALUE);
        }
    }

    #[test]
    fn test_payment_request_defaults_currency() {
        let request =
            PaymentRequest::from_request_body(JSON, &body(json!({"amount": 100}))).unwrap();

        assert_eq!(request.amount, json!(100));
        assert_eq!(request.currency, json!("USD"));
    }

    #[test]
    fn test_payment_request_passes_values_through() {
        let request = PaymentRequest::from_request_body(
            JSON,
            &body(json!({"amount": "ten", "currency": "EUR"})),
        )
        .unwrap();

        assert_eq!(request.amount, json!("ten"));
        assert_eq!(request.currency, json!("EUR"));
    }

    #[test]
    fn test_payment_request_requires_amount() {
        let err = PaymentRequest::from_request_body(JSON, &body(json!({"currency": "EUR"})))
            .unwrap_err();
        assert_eq!(err.to_string(), AMOUNT_IS_REQUIRED);
    }

    #[test]
    fn test_user_schema_valid_with_coercion() {
        let request = CreateUserRequest::from_request_body(
            None,
            &body(json!({"name": "Ada", "email": 12345, "extra": true})),
        )
        .unwrap();

        assert_eq!(request.name, "Ada");
        assert_eq!(request.email, "12345");
    }

    #[test]
    fn test_user_schema_reports_every_missing_field() {
        let found = violations(
            CreateUserRequest::from_request_body(None, &body(json!({}))).unwrap_err(),
        );

        assert_eq!(
            found,
            vec![
                SchemaViolation::missing("body", "name"),
                SchemaViolation::missing("body", "email"),
            ]
        );
    }

    #[test]
    fn test_user_schema_rejects_wrong_types() {
        let found = violations(
            CreateUserRequest::from_request_body(
                None,
                &body(json!({"name": ["Ada"], "email": null})),
            )
            .unwrap_err(),
        );

        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|v| v.kind == "type_error.str"));
    }

    #[test]
    fn test_order_schema_coerces_integers() {
        let request = CreateOrderRequest::from_request_body(
            None,
            &body(json!({"user_id": "1", "product_id": 2.0, "quantity": 3})),
        )
        .unwrap();

        assert_eq!(
            request,
            CreateOrderRequest {
                user_id: 1,
                product_id: 2,
                quantity: 3
            }
        );
    }

    #[test]
    fn test_order_schema_mixed_violations() {
        let found = violations(
            CreateOrderRequest::from_request_body(
                None,
                &body(json!({"user_id": "abc", "quantity": 1.5})),
            )
            .unwrap_err(),
        );

        assert_eq!(found.len(), 3);
        assert_eq!(found[0].loc, vec!["body", "user_id"]);
        assert_eq!(found[0].kind, "type_error.integer");
        assert_eq!(found[1], SchemaViolation::missing("body", "product_id"));
        assert_eq!(found[2].loc, vec!["body", "quantity"]);
    }

    #[test]
    fn test_schema_body_shape_errors() {
        let found = violations(CreateOrderRequest::from_request_body(None, b"").unwrap_err());
        assert_eq!(found[0].kind, "value_error.missing");

        let found =
            violations(CreateOrderRequest::from_request_body(None, b"{oops").unwrap_err());
        assert_eq!(found[0].kind, "value_error.jsondecode");

        let found = violations(CreateOrderRequest::from_request_body(None, b"[]").unwrap_err());
        assert_eq!(found[0].kind, "type_error.dict");
    }

    #[test]
    fn test_schema_rejects_non_json_content_type_as_not_a_dict() {
        let found = violations(
            CreateUserRequest::from_request_body(
                Some("application/x-www-form-urlencoded"),
                b"name=Ada&email=ada%40example.com",
            )
            .unwrap_err(),
        );
        assert_eq!(
            found,
            vec![SchemaViolation::new(
                &["body"],
                "value is not a valid dict",
                "type_error.dict"
            )]
        );

        // Declared JSON, including with parameters, is still decoded
        let request = CreateUserRequest::from_request_body(
            Some("application/json; charset=utf-8"),
            &body(json!({"name": "Ada", "email": "ada@example.com"})),
        )
        .unwrap();
        assert_eq!(request.name, "Ada");
    }

    #[test]
    fn test_route_id_parsing() {
        assert_eq!(parse_route_id("42"), Some(42));
        assert_eq!(parse_route_id("-1"), None);
        assert_eq!(parse_route_id("+1"), None);
        assert_eq!(parse_route_id("abc"), None);
        assert_eq!(parse_route_id(""), None);
    }

    #[test]
    fn test_path_id_parsing() {
        assert_eq!(parse_path_id("7", "user_id").unwrap(), Some(7));
        assert_eq!(parse_path_id("-7", "user_id").unwrap(), None);

        let found = violations(parse_path_id("seven", "order_id").unwrap_err());
        assert_eq!(found[0].loc, vec!["path", "order_id"]);
        assert_eq!(found[0].kind, "type_error.integer");
    }
}
