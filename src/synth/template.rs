//! Fixed C++ text surrounding the embedded suite.
//!
//! Contract with suite authors:
//! - tests are declared `void test_<name>(TestContext &t)`;
//! - `t.Assert(condition, message)` counts one check and, when `condition` is
//!   false, records the message and abandons the current test only;
//! - anything a test throws is recorded and the next test still runs.

/// Includes, the `TestContext` class and the test function type. Precedes
/// the suite text so the suite can name `TestContext`.
pub const PREAMBLE: &str = r#"// Generated by testweave. Do not edit.
#include <cstddef>
#include <exception>
#include <iostream>
#include <string>
#include <utility>
#include <vector>

namespace testweave_detail {
struct AssertionAbort {};
}

class TestContext {
	friend int main(int, char *[]);

	struct Failure {
		std::string test;
		int check;
		std::string message;
	};

	std::vector<Failure> failures;
	int checks;
	int test_checks;
	std::string current;

	TestContext() : checks(0), test_checks(0) {}

	void begin(const char *name) {
		current = name;
		test_checks = 0;
	}

	void record(std::string message) {
		failures.push_back(Failure{current, test_checks, std::move(message)});
	}

	void unexpected(std::string message) {
		checks++;
		test_checks++;
		record(std::move(message));
	}

public:
	void Assert(bool condition, std::string message) {
		checks++;
		test_checks++;
		if (condition)
			return;
		record(std::move(message));
		throw testweave_detail::AssertionAbort{};
	}
};

typedef void(testweave_test_fn)(TestContext &);

struct TestweaveEntry {
	const char *name;
	testweave_test_fn *fn;
};
"#;

/// Opens the test table; one `{"name", &name},` row per test follows.
pub const TABLE_OPEN: &str = "static const std::vector<TestweaveEntry> testweave_tests = {\n";

pub const TABLE_CLOSE: &str = "};\n";

/// Runs every table row in order and prints the summary.
pub const ENTRY_POINT: &str = r#"int main(int argc, char *argv[]) {
	const char *self = argc > 0 ? argv[0] : "test_runner";
	TestContext ctx;

	for (std::size_t i = 0; i < testweave_tests.size(); i++) {
		ctx.begin(testweave_tests[i].name);
		try {
			testweave_tests[i].fn(ctx);
		} catch (const testweave_detail::AssertionAbort &) {
			// recorded by Assert
		} catch (const std::exception &e) {
			ctx.unexpected(std::string("unexpected exception: ") + e.what());
		} catch (...) {
			ctx.unexpected("unexpected, unknown exception");
		}
	}

	if (ctx.failures.empty()) {
		std::cout << self << ": All tests pass.\n";
		return 0;
	}

	std::cout << self << ": " << ctx.failures.size() << '/' << ctx.checks << " checks failed:\n";
	for (std::size_t i = 0; i < ctx.failures.size(); i++) {
		const TestContext::Failure &f = ctx.failures[i];
		std::cout << f.test << " #" << f.check << ": \"" << f.message << "\"\n";
	}
	return 1;
}
"#;
