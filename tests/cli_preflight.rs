//! Missing external tools fail the run before the first step, so a
//! half-finished deploy never starts.

mod common;

use common::TestEnv;

#[test]
fn missing_docker_fails_before_any_step() {
    let env = TestEnv::new();
    let result = env.run_with_env(&["-a"], &[("DOCKHAND_DOCKER", "/nonexistent/docker")]);

    assert!(!result.success);
    assert!(
        result.stderr.contains("could not run '/nonexistent/docker'"),
        "stderr: {}",
        result.stderr
    );
    assert_eq!(env.tool_log(), "", "nothing may run when docker is absent");
}

#[test]
fn missing_scp_fails_before_the_first_build() {
    let env = TestEnv::new();
    let result = env.run_with_env(&[], &[("DOCKHAND_SCP", "/nonexistent/scp")]);

    assert!(!result.success);
    assert!(
        result.stderr.contains("could not run '/nonexistent/scp'"),
        "stderr: {}",
        result.stderr
    );

    // fail-fast: no image was built even though docker itself works
    let log = env.tool_log();
    assert!(!log.contains("docker build"), "log:\n{log}");
    assert_eq!(env.tool_calls("ssh").len(), 0);
}

#[test]
fn build_only_run_does_not_need_scp() {
    let env = TestEnv::new();
    let result = env.run_with_env(&["build", "-a"], &[("DOCKHAND_SCP", "/nonexistent/scp")]);

    assert!(result.success, "stderr: {}", result.stderr);
    assert!(env.tool_log().contains("docker build -t app-auth auth"));
}
