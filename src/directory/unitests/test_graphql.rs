use serde_json::json;

use crate::{
    ContactId,
    Error,
    PageWindow,
};
use crate::directory::{
    api_client::{
        decode,
        create_variables,
        list_variables,
        update_contact_variables,
        update_phone_variables,
    },
    graphql::{
        ContactListData,
        DeleteContactData,
        InsertContactData,
        Request,
        UpdatePhoneData,
        ADD_CONTACT_WITH_PHONES,
    },
    service::ListQuery,
};

#[test]
fn test_request_envelope() {
    let req = Request::new("AddContactWithPhones", ADD_CONTACT_WITH_PHONES, json!({}));
    let value = serde_json::to_value(&req).unwrap();

    assert_eq!(value["operationName"], "AddContactWithPhones");
    assert!(value["query"].as_str().unwrap().contains("constraint: phone_number_key"));
    assert!(value["query"].as_str().unwrap().contains("update_columns: [number]"));
    assert_eq!(value["variables"], json!({}));
}

#[test]
fn test_list_variables() {
    let vars = list_variables(&ListQuery::new(PageWindow::at_page(2)));
    assert_eq!(vars, json!({ "limit": 10, "offset": 20 }));

    let query = ListQuery::new(PageWindow::new())
        .with_order_by(json!([{ "first_name": "asc" }]))
        .with_where(json!({ "first_name": { "_ilike": "%a%" } }))
        .with_distinct_on(json!(["first_name"]));
    let vars = list_variables(&query);
    assert_eq!(vars["order_by"], json!([{ "first_name": "asc" }]));
    assert_eq!(vars["where"]["first_name"]["_ilike"], "%a%");
    assert_eq!(vars["distinct_on"], json!(["first_name"]));
}

#[test]
fn test_mutation_variables() {
    let vars = create_variables("Alice", "Smith", &["0811".into(), "".into()]);
    assert_eq!(vars, json!({
        "first_name": "Alice",
        "last_name": "Smith",
        "phones": [{ "number": "0811" }, { "number": "" }],
    }));

    let vars = update_contact_variables(ContactId::new(4), "Alicia", "Smythe");
    assert_eq!(vars, json!({
        "id": 4,
        "_set": { "first_name": "Alicia", "last_name": "Smythe" },
    }));

    let vars = update_phone_variables(ContactId::new(4), "222", "333");
    assert_eq!(vars, json!({
        "pk_columns": { "number": "222", "contact_id": 4 },
        "new_phone_number": "333",
    }));
}

#[test]
fn test_decode_list() {
    let body = br#"{"data": {"contact": [
        {"created_at": "2023-08-01", "first_name": "A", "id": 1, "last_name": "B", "phones": [{"number": "1"}]},
        {"created_at": "2023-08-02", "first_name": "C", "id": 2, "last_name": "D", "phones": []}
    ]}}"#;

    let data = decode::<ContactListData>(body).unwrap();
    assert_eq!(data.contact.len(), 2);
    assert_eq!(data.contact[1].id(), ContactId::new(2));
}

#[test]
fn test_decode_mutations() {
    let body = br#"{"data": {"insert_contact": {"returning": [
        {"first_name": "A", "last_name": "B", "id": 9, "phones": [{"number": "1"}]}
    ]}}}"#;
    let data = decode::<InsertContactData>(body).unwrap();
    assert_eq!(data.insert_contact.unwrap().returning[0].id(), ContactId::new(9));

    let body = br#"{"data": {"delete_contact_by_pk": null}}"#;
    let data = decode::<DeleteContactData>(body).unwrap();
    assert!(data.delete_contact_by_pk.is_none());

    let body = br#"{"data": {"update_phone_by_pk": {"contact": {
        "id": 9, "first_name": "A", "last_name": "B", "created_at": "x", "phones": [{"number": "2"}]
    }}}}"#;
    let data = decode::<UpdatePhoneData>(body).unwrap();
    assert_eq!(data.update_phone_by_pk.unwrap().contact.phone_numbers(), vec!["2"]);
}

#[test]
fn test_decode_errors() {
    let body = br#"{"errors": [
        {"extensions": {"code": "constraint-violation"},
         "message": "Uniqueness violation. duplicate key value violates unique constraint \"phone_number_key\""}
    ]}"#;

    let err = decode::<ContactListData>(body).err().unwrap();
    assert!(matches!(err, Error::Service(_)));
    assert!(err.is_phone_conflict());

    let body = br#"{"errors": [{"message": "first"}, {"message": "second"}], "data": null}"#;
    let err = decode::<ContactListData>(body).err().unwrap();
    assert_eq!(err.to_string(), "first; second");
    assert!(!err.is_phone_conflict());

    let body = br#"{"data": null}"#;
    assert!(matches!(decode::<ContactListData>(body), Err(Error::Protocol(_))));

    let body = b"<html>bad gateway</html>";
    assert!(matches!(decode::<ContactListData>(body), Err(Error::Protocol(_))));
}

#[test]
fn test_conflict_classification() {
    let conflict = Error::Service(
        "Uniqueness violation. duplicate key value violates unique constraint \"phone_number_key\"".into()
    );
    assert!(conflict.is_phone_conflict());

    // Both fragments are needed.
    assert!(!Error::Service("Uniqueness violation on contact_pkey".into()).is_phone_conflict());
    assert!(!Error::Service("phone_number_key missing".into()).is_phone_conflict());
    assert!(!Error::Network(
        "Uniqueness violation phone_number_key".into()
    ).is_phone_conflict());
}
