// SPDX-License-Identifier: MIT
// Sample events as delivered by the Lambda invoke loop

pub(crate) const API_GATEWAY_V2_GET_ROOT_NOQUERY: &str = r###"{
    "headers":{
        "x-forwarded-for":"1.2.3.4",
        "x-forwarded-port":"443",
        "x-forwarded-proto":"https"
    },
    "isBase64Encoded":false,
    "rawPath":"/",
    "rawQueryString":"",
    "requestContext":{
        "domainName":"yyyyyyyyyy.execute-api.ap-northeast-1.amazonaws.com",
        "http":{
            "method":"GET",
            "sourceIp":"1.2.3.4"
        }
    },
    "version":"2.0"
}"###;

pub(crate) const API_GATEWAY_V2_GET_SOMEWHERE_TWOQUERY: &str = r###"{
    "headers":{
        "x-forwarded-for":"1.2.3.4",
        "x-forwarded-port":"443",
        "x-forwarded-proto":"https"
    },
    "isBase64Encoded":false,
    "rawPath":"/somewhere",
    "rawQueryString":"key1=value1&key2=value2",
    "requestContext":{
        "domainName":"yyyyyyyyyy.execute-api.ap-northeast-1.amazonaws.com",
        "http":{
            "method":"GET",
            "sourceIp":"1.2.3.4"
        }
    },
    "version":"2.0"
}"###;

pub(crate) const API_GATEWAY_V2_GET_SPACEPATH_NOQUERY: &str = r###"{
    "headers":{
        "x-forwarded-for":"1.2.3.4",
        "x-forwarded-port":"443",
        "x-forwarded-proto":"https"
    },
    "isBase64Encoded":false,
    "rawPath":"/path with/space",
    "rawQueryString":"",
    "requestContext":{
        "domainName":"yyyyyyyyyy.execute-api.ap-northeast-1.amazonaws.com",
        "http":{
            "method":"GET",
            "sourceIp":"1.2.3.4"
        }
    },
    "version":"2.0"
}"###;

pub(crate) const API_GATEWAY_V2_GET_PERCENTPATH_NOQUERY: &str = r###"{
    "headers":{
        "x-forwarded-for":"1.2.3.4",
        "x-forwarded-port":"443",
        "x-forwarded-proto":"https"
    },
    "isBase64Encoded":false,
    "rawPath":"/path%with/percent",
    "rawQueryString":"",
    "requestContext":{
        "domainName":"yyyyyyyyyy.execute-api.ap-northeast-1.amazonaws.com",
        "http":{
            "method":"GET",
            "sourceIp":"1.2.3.4"
        }
    },
    "version":"2.0"
}"###;

pub(crate) const API_GATEWAY_V2_GET_UTF8PATH_NOQUERY: &str = r###"{
    "headers":{
        "x-forwarded-for":"1.2.3.4",
        "x-forwarded-port":"443",
        "x-forwarded-proto":"https"
    },
    "isBase64Encoded":false,
    "rawPath":"/日本語/ファイル名",
    "rawQueryString":"",
    "requestContext":{
        "domainName":"yyyyyyyyyy.execute-api.ap-northeast-1.amazonaws.com",
        "http":{
            "method":"GET",
            "sourceIp":"1.2.3.4"
        }
    },
    "version":"2.0"
}"###;

pub(crate) const API_GATEWAY_V2_GET_TWO_COOKIES: &str = r###"{
    "cookies":[
        "cookie1=value1",
        "cookie2=value2"
    ],
    "headers":{
        "x-forwarded-for":"1.2.3.4",
        "x-forwarded-port":"443",
        "x-forwarded-proto":"https"
    },
    "isBase64Encoded":false,
    "rawPath":"/",
    "rawQueryString":"",
    "requestContext":{
        "domainName":"yyyyyyyyyy.execute-api.ap-northeast-1.amazonaws.com",
        "http":{
            "method":"GET",
            "sourceIp":"1.2.3.4"
        }
    },
    "version":"2.0"
}"###;

pub(crate) const API_GATEWAY_V2_GET_REMOTE_IPV6: &str = r###"{
    "headers":{
        "x-forwarded-for":"2404:6800:400a:80c::2004",
        "x-forwarded-port":"443",
        "x-forwarded-proto":"https"
    },
    "isBase64Encoded":false,
    "rawPath":"/",
    "rawQueryString":"",
    "requestContext":{
        "domainName":"yyyyyyyyyy.execute-api.ap-northeast-1.amazonaws.com",
        "http":{
            "method":"GET",
            "sourceIp":"2404:6800:400a:80c::2004"
        }
    },
    "version":"2.0"
}"###;

pub(crate) const API_GATEWAY_V2_GET_ACCEPT_BR: &str = r###"{
    "headers":{
        "accept-encoding":"gzip, deflate, br",
        "x-forwarded-for":"1.2.3.4",
        "x-forwarded-port":"443",
        "x-forwarded-proto":"https"
    },
    "isBase64Encoded":false,
    "rawPath":"/index.html",
    "rawQueryString":"",
    "requestContext":{
        "domainName":"yyyyyyyyyy.execute-api.ap-northeast-1.amazonaws.com",
        "http":{
            "method":"GET",
            "sourceIp":"1.2.3.4"
        }
    },
    "version":"2.0"
}"###;

pub(crate) const API_GATEWAY_V2_POST_FORM_URLENCODED: &str = r###"{
    "body":"key1=value1&key2=value2",
    "headers":{
        "content-type":"application/x-www-form-urlencoded",
        "x-forwarded-for":"1.2.3.4",
        "x-forwarded-port":"443",
        "x-forwarded-proto":"https"
    },
    "isBase64Encoded":false,
    "rawPath":"/",
    "rawQueryString":"",
    "requestContext":{
        "domainName":"yyyyyyyyyy.execute-api.ap-northeast-1.amazonaws.com",
        "http":{
            "method":"POST",
            "sourceIp":"1.2.3.4"
        }
    },
    "version":"2.0"
}"###;

pub(crate) const API_GATEWAY_V2_POST_FORM_URLENCODED_B64: &str = r###"{
    "body":"a2V5MT12YWx1ZTEma2V5Mj12YWx1ZTI=",
    "headers":{
        "content-type":"application/x-www-form-urlencoded",
        "x-forwarded-for":"1.2.3.4",
        "x-forwarded-port":"443",
        "x-forwarded-proto":"https"
    },
    "isBase64Encoded":true,
    "rawPath":"/",
    "rawQueryString":"",
    "requestContext":{
        "domainName":"yyyyyyyyyy.execute-api.ap-northeast-1.amazonaws.com",
        "http":{
            "method":"POST",
            "sourceIp":"1.2.3.4"
        }
    },
    "version":"2.0"
}"###;

pub(crate) const API_GATEWAY_V2_POST_BROKEN_B64: &str = r###"{
    "body":"not base64 !!",
    "headers":{
        "content-type":"application/octet-stream"
    },
    "isBase64Encoded":true,
    "rawPath":"/upload",
    "rawQueryString":"",
    "requestContext":{
        "domainName":"yyyyyyyyyy.execute-api.ap-northeast-1.amazonaws.com",
        "http":{
            "method":"POST",
            "sourceIp":"1.2.3.4"
        }
    },
    "version":"2.0"
}"###;

pub(crate) const API_GATEWAY_REST_GET_SPACEPATH: &str = r###"{
    "resource":"/{proxy+}",
    "path":"/path with/space",
    "httpMethod":"GET",
    "headers":null,
    "multiValueHeaders":null,
    "queryStringParameters":null,
    "multiValueQueryStringParameters":null,
    "pathParameters":{"proxy":"path with/space"},
    "stageVariables":null,
    "requestContext":{
        "resourcePath":"/{proxy+}",
        "httpMethod":"GET",
        "stage":"prod",
        "domainName":"xxxxxxxxxx.execute-api.us-east-1.amazonaws.com",
        "identity":{
            "sourceIp":"10.0.0.7"
        }
    },
    "body":null,
    "isBase64Encoded":false
}"###;

pub(crate) const API_GATEWAY_REST_GET_MULTIQUERY: &str = r###"{
    "resource":"/{proxy+}",
    "path":"/search",
    "httpMethod":"GET",
    "headers":{
        "Accept":"application/json",
        "Host":"xxxxxxxxxx.execute-api.us-east-1.amazonaws.com"
    },
    "multiValueHeaders":{
        "Accept":["text/html","application/json"],
        "Host":["xxxxxxxxxx.execute-api.us-east-1.amazonaws.com"]
    },
    "queryStringParameters":{"a":"2","q":"hello world"},
    "multiValueQueryStringParameters":{"a":["1","2"],"q":["hello world"]},
    "pathParameters":{"proxy":"search"},
    "stageVariables":null,
    "requestContext":{
        "resourcePath":"/{proxy+}",
        "httpMethod":"GET",
        "stage":"prod",
        "domainName":"xxxxxxxxxx.execute-api.us-east-1.amazonaws.com",
        "identity":{
            "sourceIp":"10.0.0.7"
        }
    },
    "body":null,
    "isBase64Encoded":false
}"###;

pub(crate) const ALB_GET_QUERY: &str = r###"{
    "requestContext":{
        "elb":{
            "targetGroupArn":"arn:aws:elasticloadbalancing:us-east-1:123456789012:targetgroup/lambda-279XGJDqGZ5rsrHC2Fjr/49e9d65c45c6791a"
        }
    },
    "httpMethod":"GET",
    "path":"/lambda",
    "queryStringParameters":{
        "name":"caf%C3%A9"
    },
    "headers":{
        "accept":"text/html",
        "host":"lambda-alb-123578498.us-east-1.elb.amazonaws.com",
        "x-forwarded-for":"72.12.164.125",
        "x-forwarded-port":"80",
        "x-forwarded-proto":"http"
    },
    "body":"",
    "isBase64Encoded":false
}"###;

pub(crate) const ALB_GET_MULTI_VALUE: &str = r###"{
    "requestContext":{
        "elb":{
            "targetGroupArn":"arn:aws:elasticloadbalancing:us-east-1:123456789012:targetgroup/lambda-279XGJDqGZ5rsrHC2Fjr/49e9d65c45c6791a"
        }
    },
    "httpMethod":"GET",
    "path":"/lambda",
    "multiValueQueryStringParameters":{
        "tag":["a","b"]
    },
    "multiValueHeaders":{
        "host":["lambda-alb-123578498.us-east-1.elb.amazonaws.com"],
        "x-forwarded-for":["72.12.164.125"],
        "x-forwarded-proto":["https"]
    },
    "body":"",
    "isBase64Encoded":false
}"###;

pub(crate) const ALB_GET_NO_HOST: &str = r###"{
    "requestContext":{
        "elb":{
            "targetGroupArn":"arn:aws:elasticloadbalancing:us-east-1:123456789012:targetgroup/lambda-279XGJDqGZ5rsrHC2Fjr/49e9d65c45c6791a"
        }
    },
    "httpMethod":"GET",
    "path":"/health",
    "queryStringParameters":{
        "full":"1"
    },
    "headers":{
        "user-agent":"ELB-HealthChecker/2.0"
    },
    "body":"",
    "isBase64Encoded":false
}"###;
