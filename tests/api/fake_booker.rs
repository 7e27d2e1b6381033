//! An in-memory stand-in for the booking service, served through wiremock.

use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use wiremock::{Request, Respond, ResponseTemplate};

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "password123";
pub const TOKEN: &str = "abc123";
pub const SEEDED_ID: u64 = 1;

/// Ways the fake can misbehave, to check that scenarios notice.
#[derive(Debug, Clone, Default)]
pub struct Quirks {
    pub ping_status: Option<u16>,
    pub issue_tokens_to_anyone: bool,
    pub ignore_auth: bool,
    pub drop_additional_needs: bool,
    pub patch_resets_price: bool,
    pub keep_deleted: bool,
    pub string_ids: bool,
}

struct State {
    next_id: u64,
    bookings: BTreeMap<u64, Value>,
}

#[derive(Clone)]
pub struct FakeBooker {
    state: Arc<Mutex<State>>,
    quirks: Quirks,
}

impl FakeBooker {
    pub fn new(quirks: Quirks) -> Self {
        let mut bookings = BTreeMap::new();
        bookings.insert(
            SEEDED_ID,
            json!({
                "firstname": "Sally",
                "lastname": "Brown",
                "totalprice": 153,
                "depositpaid": false,
                "bookingdates": { "checkin": "2014-03-13", "checkout": "2014-05-21" },
                "additionalneeds": "Breakfast"
            }),
        );
        Self {
            state: Arc::new(Mutex::new(State {
                next_id: SEEDED_ID + 1,
                bookings,
            })),
            quirks,
        }
    }

    pub fn booking_count(&self) -> usize {
        self.state.lock().unwrap().bookings.len()
    }

    fn authorized(&self, request: &Request) -> bool {
        self.quirks.ignore_auth
            || request
                .headers
                .get("cookie")
                .and_then(|v| v.to_str().ok())
                .is_some_and(|cookie| cookie == format!("token={}", TOKEN))
    }

    fn handle(&self, request: &Request) -> ResponseTemplate {
        let segments: Vec<&str> = request
            .url
            .path()
            .trim_matches('/')
            .split('/')
            .collect();
        let id = segments.get(1).and_then(|s| s.parse::<u64>().ok());

        match (request.method.as_str(), segments.as_slice()) {
            ("GET", ["ping"]) => {
                ResponseTemplate::new(self.quirks.ping_status.unwrap_or(201)).set_body_string("Created")
            }
            ("POST", ["auth"]) => self.create_token(request),
            ("GET", ["booking"]) => self.list(request),
            ("POST", ["booking"]) => self.create(request),
            ("GET", ["booking", _]) => self.get(id),
            ("PUT", ["booking", _]) | ("PATCH", ["booking", _]) | ("DELETE", ["booking", _])
                if !self.authorized(request) =>
            {
                ResponseTemplate::new(403).set_body_string("Forbidden")
            }
            ("PUT", ["booking", _]) => self.update(id, request, false),
            ("PATCH", ["booking", _]) => self.update(id, request, true),
            ("DELETE", ["booking", _]) => self.delete(id),
            _ => ResponseTemplate::new(404).set_body_string("Not Found"),
        }
    }

    fn create_token(&self, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap_or_default();
        let valid = body["username"] == USERNAME && body["password"] == PASSWORD;
        if valid || self.quirks.issue_tokens_to_anyone {
            ResponseTemplate::new(200).set_body_json(json!({ "token": TOKEN }))
        } else {
            ResponseTemplate::new(200).set_body_json(json!({ "reason": "Bad credentials" }))
        }
    }

    fn list(&self, request: &Request) -> ResponseTemplate {
        let query: BTreeMap<String, String> = request.url.query_pairs().into_owned().collect();
        let matches = |key: &str, value: &Value| {
            query
                .get(key)
                .is_none_or(|q| value.as_str().is_some_and(|v| v.eq_ignore_ascii_case(q)))
        };
        let state = self.state.lock().unwrap();
        let ids: Vec<Value> = state
            .bookings
            .iter()
            .filter(|(_, b)| matches("firstname", &b["firstname"]))
            .filter(|(_, b)| matches("lastname", &b["lastname"]))
            .filter(|(_, b)| {
                query.get("checkin").is_none_or(|q| {
                    b["bookingdates"]["checkin"].as_str().is_some_and(|d| d >= q.as_str())
                })
            })
            .filter(|(_, b)| {
                query.get("checkout").is_none_or(|q| {
                    b["bookingdates"]["checkout"].as_str().is_some_and(|d| d <= q.as_str())
                })
            })
            .map(|(id, _)| {
                if self.quirks.string_ids {
                    json!({ "bookingid": id.to_string() })
                } else {
                    json!({ "bookingid": id })
                }
            })
            .collect();
        ResponseTemplate::new(200).set_body_json(ids)
    }

    fn create(&self, request: &Request) -> ResponseTemplate {
        let Ok(mut booking) = serde_json::from_slice::<Value>(&request.body) else {
            return ResponseTemplate::new(500).set_body_string("Internal Server Error");
        };
        if self.quirks.drop_additional_needs {
            if let Some(map) = booking.as_object_mut() {
                map.remove("additionalneeds");
            }
        }
        let mut state = self.state.lock().unwrap();
        let id = state.next_id;
        state.next_id += 1;
        state.bookings.insert(id, booking.clone());
        ResponseTemplate::new(200).set_body_json(json!({ "bookingid": id, "booking": booking }))
    }

    fn get(&self, id: Option<u64>) -> ResponseTemplate {
        let state = self.state.lock().unwrap();
        match id.and_then(|id| state.bookings.get(&id)) {
            Some(booking) => ResponseTemplate::new(200).set_body_json(booking),
            None => ResponseTemplate::new(404).set_body_string("Not Found"),
        }
    }

    fn update(&self, id: Option<u64>, request: &Request, partial: bool) -> ResponseTemplate {
        let Ok(body) = serde_json::from_slice::<Value>(&request.body) else {
            return ResponseTemplate::new(400).set_body_string("Bad Request");
        };
        let mut state = self.state.lock().unwrap();
        let stored = match id {
            Some(id) => state.bookings.get_mut(&id),
            None => None,
        };
        let Some(stored) = stored else {
            return ResponseTemplate::new(405).set_body_string("Method Not Allowed");
        };
        if partial {
            merge(stored, &body);
            if self.quirks.patch_resets_price {
                stored["totalprice"] = json!(0);
            }
        } else {
            *stored = body;
        }
        ResponseTemplate::new(200).set_body_json(stored.clone())
    }

    fn delete(&self, id: Option<u64>) -> ResponseTemplate {
        let mut state = self.state.lock().unwrap();
        let Some(id) = id.filter(|id| state.bookings.contains_key(id)) else {
            return ResponseTemplate::new(405).set_body_string("Method Not Allowed");
        };
        if !self.quirks.keep_deleted {
            state.bookings.remove(&id);
        }
        ResponseTemplate::new(201).set_body_string("Created")
    }
}

fn merge(target: &mut Value, patch: &Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                merge(target.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (target, patch) => *target = patch.clone(),
    }
}

impl Respond for FakeBooker {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        self.handle(request)
    }
}
