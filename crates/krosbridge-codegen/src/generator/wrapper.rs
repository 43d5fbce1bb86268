//! Topic, service and action wrapper classes.
//!
//! Each wrapper extends the matching generic krosbridge class and exposes
//! `suspend` operations whose parameters are the payload's variable fields.
//! The operations build the payload and forward it to the base class.

use crate::code_writer::CodeWriter;
use crate::error::{Error, Result};
use crate::kotlin::{ClassName, KotlinType, escape_identifier, krosbridge, string_literal};
use crate::resolver::TypeResolver;
use crate::types::{Action, Field, Message, Service, TypeName};

use super::source::KotlinFile;
use super::{
    FEEDBACK_SUFFIX, GOAL_SUFFIX, REQUEST_SUFFIX, RESPONSE_SUFFIX, RESULT_SUFFIX, TOPIC_SUFFIX,
};

/// One `public suspend fun` of a wrapper
struct Operation {
    name: &'static str,
    params: Vec<String>,
    returns: Option<String>,
    body: String,
}

impl Operation {
    fn write(&self, w: &mut CodeWriter<String>) -> std::fmt::Result {
        let signature = match &self.returns {
            Some(ret) => format!(
                "public suspend fun {}({}): {}",
                self.name,
                self.params.join(", "),
                ret
            ),
            None => format!("public suspend fun {}({})", self.name, self.params.join(", ")),
        };
        w.block(&signature, |w| w.writeln(&self.body))
    }
}

/// Declarations and argument names for the variable fields of a payload
struct Params {
    decls: Vec<String>,
    args: Vec<String>,
}

impl Params {
    fn new(
        file: &mut KotlinFile,
        resolver: &TypeResolver,
        fields: &[Field],
        enclosing: &[String],
    ) -> Self {
        let mut decls = Vec::new();
        let mut args = Vec::new();
        for field in fields.iter().filter(|f| f.is_variable()) {
            let name = escape_identifier(&field.name);
            let ty = file.type_name(&resolver.resolve(field, enclosing));
            decls.push(format!("{}: {}", name, ty));
            args.push(name);
        }
        Self { decls, args }
    }

    /// Rejects a payload field named like one of the operation's own parameters
    fn reserve(&self, schema: &TypeName, operation: &'static str, reserved: &[&str]) -> Result<()> {
        match self.args.iter().find(|arg| reserved.contains(&arg.as_str())) {
            Some(name) => Err(Error::ReservedParameter {
                schema: schema.clone(),
                operation,
                name: name.clone(),
            }),
            None => Ok(()),
        }
    }

    /// `Payload(a, b)`
    fn construct(&self, payload: &str) -> String {
        format!("{}({})", payload, self.args.join(", "))
    }
}

/// Class header shared by every wrapper:
/// `(ros: Ros, name: String) : Base<..>(ros, name, "<type>", Payload::class, ..)`
fn write_wrapper<F>(
    file: &mut KotlinFile,
    schema_name: &TypeName,
    base: &ClassName,
    payloads: &[&ClassName],
    body: F,
) -> Result<String>
where
    F: FnOnce(&mut KotlinFile) -> Result<Vec<Operation>>,
{
    let wrapper = escape_identifier(&file.class().simple);
    let ros = file.name(&krosbridge::ros());
    let string = file.name(&ClassName::string());
    let base_type = file.type_name(&KotlinType::parameterized(
        base.clone(),
        payloads.iter().map(|p| p.to_type()).collect(),
    ));
    let mut base_args = vec![
        "ros".to_string(),
        "name".to_string(),
        string_literal(&schema_name.to_string()),
    ];
    for payload in payloads {
        base_args.push(format!("{}::class", file.name(payload)));
    }
    let operations = body(file)?;

    let mut w = CodeWriter::new(String::new());
    w.writeln(&format!("public class {}(", wrapper))?;
    {
        let _indent = w.indent();
        w.writeln(&format!("ros: {},", ros))?;
        w.writeln(&format!("name: {}", string))?;
    }
    let header = format!(") : {}({})", base_type, base_args.join(", "));
    w.block(&header, |w| {
        for (i, operation) in operations.iter().enumerate() {
            if i > 0 {
                w.blank_line()?;
            }
            operation.write(w)?;
        }
        Ok(())
    })?;

    Ok(file.finish(&w.into_inner()))
}

/// `XTopic : GenericTopic<X>` with `publish`
pub fn render_topic_class(resolver: &TypeResolver, msg: &Message) -> Result<(ClassName, String)> {
    let ns = &msg.name.namespace;
    let payload = resolver.class_for(&msg.name);
    let wrapper = resolver.class_for(&msg.name.with_suffix(TOPIC_SUFFIX));
    let mut file = KotlinFile::new(wrapper.clone());

    let text = write_wrapper(
        &mut file,
        &msg.name,
        &krosbridge::generic_topic(),
        &[&payload],
        |file| {
            let payload_name = file.name(&payload);
            let params = Params::new(file, resolver, &msg.fields, ns);
            Ok(vec![Operation {
                name: "publish",
                body: format!("return super.publish({})", params.construct(&payload_name)),
                params: params.decls,
                returns: None,
            }])
        },
    )?;
    Ok((wrapper, text))
}

/// `X : GenericService<XRequest, XResponse>` with `call` and `sendResponse`
pub fn render_service_class(resolver: &TypeResolver, srv: &Service) -> Result<(ClassName, String)> {
    let ns = &srv.name.namespace;
    let request = resolver.class_for(&srv.name.with_suffix(REQUEST_SUFFIX));
    let response = resolver.class_for(&srv.name.with_suffix(RESPONSE_SUFFIX));
    let wrapper = resolver.class_for(&srv.name);
    let mut file = KotlinFile::new(wrapper.clone());

    let text = write_wrapper(
        &mut file,
        &srv.name,
        &krosbridge::generic_service(),
        &[&request, &response],
        |file| {
            let request_name = file.name(&request);
            let response_name = file.name(&response);
            let call_returns = file.type_name(&KotlinType::parameterized(
                ClassName::pair(),
                vec![response.to_type().nullable(), ClassName::boolean().to_type()],
            ));
            let boolean = file.name(&ClassName::boolean());
            let nullable_string = file.type_name(&ClassName::string().to_type().nullable());

            let call = Params::new(file, resolver, &srv.request, ns);
            let mut respond = Params::new(file, resolver, &srv.response, ns);
            respond.reserve(&srv.name, "sendResponse", &["serviceResult", "serviceId"])?;
            let respond_body = format!(
                "return super.sendResponse({}, serviceResult, serviceId)",
                respond.construct(&response_name)
            );
            respond.decls.push(format!("serviceResult: {}", boolean));
            respond.decls.push(format!("serviceId: {}", nullable_string));

            Ok(vec![
                Operation {
                    name: "call",
                    body: format!("return super.call({})", call.construct(&request_name)),
                    params: call.decls,
                    returns: Some(call_returns),
                },
                Operation {
                    name: "sendResponse",
                    params: respond.decls,
                    returns: None,
                    body: respond_body,
                },
            ])
        },
    )?;
    Ok((wrapper, text))
}

/// `X : GenericAction<XGoal, XFeedback, XResult>` with `sendGoal`,
/// `sendFeedback` and `sendResult`
pub fn render_action_class(resolver: &TypeResolver, action: &Action) -> Result<(ClassName, String)> {
    let ns = &action.name.namespace;
    let goal = resolver.class_for(&action.name.with_suffix(GOAL_SUFFIX));
    let feedback = resolver.class_for(&action.name.with_suffix(FEEDBACK_SUFFIX));
    let result = resolver.class_for(&action.name.with_suffix(RESULT_SUFFIX));
    let wrapper = resolver.class_for(&action.name);
    let mut file = KotlinFile::new(wrapper.clone());

    let text = write_wrapper(
        &mut file,
        &action.name,
        &krosbridge::generic_action(),
        &[&goal, &feedback, &result],
        |file| {
            let goal_name = file.name(&goal);
            let feedback_name = file.name(&feedback);
            let result_name = file.name(&result);
            let boolean = file.name(&ClassName::boolean());
            let string = file.name(&ClassName::string());
            let goal_returns = file.type_name(&KotlinType::parameterized(
                ClassName::flow(),
                vec![krosbridge::action_type().to_type()],
            ));

            let goal_params = Params::new(file, resolver, &action.goal, ns);
            goal_params.reserve(&action.name, "sendGoal", &["feedback"])?;
            let mut send_goal = vec![format!("feedback: {}", boolean)];
            send_goal.extend(goal_params.decls.iter().cloned());

            let mut send_feedback = Params::new(file, resolver, &action.feedback, ns);
            send_feedback.reserve(&action.name, "sendFeedback", &["id"])?;
            let feedback_body = format!(
                "return super.sendFeedback({}, id)",
                send_feedback.construct(&feedback_name)
            );
            send_feedback.decls.push(format!("id: {}", string));

            let mut send_result = Params::new(file, resolver, &action.result, ns);
            send_result.reserve(&action.name, "sendResult", &["id", "isResult"])?;
            let result_body = format!(
                "return super.sendResult({}, id, isResult)",
                send_result.construct(&result_name)
            );
            send_result.decls.push(format!("id: {}", string));
            send_result.decls.push(format!("isResult: {} = true", boolean));

            Ok(vec![
                Operation {
                    name: "sendGoal",
                    params: send_goal,
                    returns: Some(goal_returns),
                    body: format!(
                        "return super.sendGoal({}, feedback)",
                        goal_params.construct(&goal_name)
                    ),
                },
                Operation {
                    name: "sendFeedback",
                    params: send_feedback.decls,
                    returns: None,
                    body: feedback_body,
                },
                Operation {
                    name: "sendResult",
                    params: send_result.decls,
                    returns: None,
                    body: result_body,
                },
            ])
        },
    )?;
    Ok((wrapper, text))
}
