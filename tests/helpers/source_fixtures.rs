//! Robot documents shared by several test modules.

#![allow(dead_code)]

pub const LOGIN_RESOURCE: &str = "\
*** Variables ***
${LOGIN URL}    http://localhost/login

*** Keywords ***
Go To Page
    [Arguments]    ${url}
    Log    ${url}

Submit Credentials
    Log    submitting
";

pub const LOGIN_SUITE: &str = "\
*** Settings ***
Resource    login.resource

*** Test Cases ***
Valid Login
    Go To Page    ${LOGIN URL}
    submit_credentials

Invalid Login
    GO TO PAGE    ${login_url}
";

/// `a.resource` and `b.resource` import each other.
pub const CYCLE_A: &str = "\
*** Settings ***
Resource    b.resource
Resource    shared_a.resource

*** Keywords ***
From A
    No Operation
";

pub const CYCLE_B: &str = "\
*** Settings ***
Resource    a.resource
Resource    shared_b.resource

*** Keywords ***
From B
    No Operation
";

pub const SHARED_A: &str = "\
*** Keywords ***
Shared A
    No Operation
";

pub const SHARED_B: &str = "\
*** Keywords ***
Shared B
    No Operation
";
