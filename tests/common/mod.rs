#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread::JoinHandle;

/// A local HTTP server that answers exactly one request with a canned response.
pub struct OneShotServer {
    pub base_url: String,
    handle: JoinHandle<String>,
}

impl OneShotServer {
    /// Wait for the single request and return its request line and headers.
    pub fn request(self) -> String {
        self.handle.join().unwrap()
    }
}

/// Serve one request with `status` (e.g. `"200 OK"`) and a JSON `body`.
pub fn serve_once(status: &str, body: &str) -> OneShotServer {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    let handle = std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut head = String::new();
        loop {
            let mut line = String::new();
            let n = reader.read_line(&mut line).unwrap();
            if n == 0 || line == "\r\n" {
                break;
            }
            head.push_str(&line);
        }
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        head
    });

    OneShotServer { base_url, handle }
}

/// A base URL nothing is listening on.
pub fn closed_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Work item JSON shaped like the Azure DevOps API response.
pub fn work_item_json(id: u64, title: &str, work_item_type: &str, criteria: &str) -> String {
    serde_json::json!({
        "id": id,
        "rev": 12,
        "fields": {
            "System.Title": title,
            "System.WorkItemType": work_item_type,
            "System.State": "Active",
            "Microsoft.VSTS.Common.AcceptanceCriteria": criteria
        },
        "url": format!("https://dev.azure.com/contoso/web/_apis/wit/workItems/{id}")
    })
    .to_string()
}

/// Acceptance criteria as the Azure DevOps rich-text editor stores them.
pub const LOGIN_CRITERIA_HTML: &str = "<div>Scenario 1: Successful login</div><div>Given the user is on the login page&nbsp;</div><div>When they enter valid credentials</div><div>Then they see the dashboard</div><div><br></div><div>Scenario 2: Failed login</div><div>Given the user is on the login page When they enter a wrong password Then an error is shown</div>";

pub const LOGIN_CRITERIA_TEXT: &str = "Scenario 1: Successful login
Given the user is on the login page
When they enter valid credentials
Then they see the dashboard

Scenario 2: Failed login
Given the user is on the login page
When they enter a wrong password
Then an error is shown";
